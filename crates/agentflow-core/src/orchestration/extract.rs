//! Planner response extraction
//!
//! Models wrap their JSON in fences and language tags; cleaning is a separate
//! pure step so it can be swapped for structured output later.

use super::types::Task;
use thiserror::Error;

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";

/// Why a planner response could not be turned into tasks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("planner returned no content")]
    Empty,

    #[error("planner output is not a JSON array of tasks: {0}")]
    Malformed(String),
}

/// Strip fences and a leading `json` tag from raw planner text
///
/// 1. If a fence is present, keep only the text between the first two fences
///    (or everything after an unterminated one).
/// 2. Drop a leading `json` language tag, any case.
/// 3. Trim surrounding whitespace.
pub fn clean_planner_output(raw: &str) -> String {
    let fenced = match raw.split_once(FENCE) {
        Some((_, rest)) => rest.split_once(FENCE).map(|(inner, _)| inner).unwrap_or(rest),
        None => raw,
    };

    let trimmed = fenced.trim_start();
    let untagged = match trimmed.get(..LANGUAGE_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(LANGUAGE_TAG) => &trimmed[LANGUAGE_TAG.len()..],
        _ => trimmed,
    };

    untagged.trim().to_string()
}

/// Clean and decode planner text into an ordered task list
///
/// Only the shape is checked here; agent names are resolved by the executor.
pub fn parse_task_list(raw: &str) -> Result<Vec<Task>, ExtractError> {
    let cleaned = clean_planner_output(raw);
    if cleaned.is_empty() {
        return Err(ExtractError::Empty);
    }

    serde_json::from_str::<Vec<Task>>(&cleaned).map_err(|e| ExtractError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_json_is_recovered() {
        let raw = "```json\n[{\"agent\":\"LinkedIn\",\"label\":\"x\",\"prompt\":\"y\"}]\n```";
        assert_eq!(
            clean_planner_output(raw),
            r#"[{"agent":"LinkedIn","label":"x","prompt":"y"}]"#
        );
        assert_eq!(
            parse_task_list(raw).unwrap(),
            vec![Task::new("LinkedIn", "x", "y")]
        );
    }

    #[test]
    fn test_prose_around_fence_is_dropped() {
        let raw = "Here is the plan:\n```JSON\n[]\n```\nGood luck!";
        assert_eq!(clean_planner_output(raw), "[]");
    }

    #[test]
    fn test_unfenced_text_is_trimmed() {
        assert_eq!(clean_planner_output("  \n[1]\n "), "[1]");
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(clean_planner_output("```json\n[]"), "[]");
    }

    #[test]
    fn test_json_inside_values_is_kept() {
        let raw = r#"[{"agent":"Gemini","label":"json export","prompt":"write json"}]"#;
        let tasks = parse_task_list(raw).unwrap();
        assert_eq!(tasks[0].label, "json export");
        assert_eq!(tasks[0].prompt, "write json");
    }

    #[test]
    fn test_url_is_optional() {
        let raw = r#"[
            {"agent":"LinkedIn","label":"a","prompt":"b","url":"https://www.linkedin.com/"},
            {"agent":"Gemini","label":"c","prompt":"d"}
        ]"#;
        let tasks = parse_task_list(raw).unwrap();
        assert_eq!(tasks[0].url.as_deref(), Some("https://www.linkedin.com/"));
        assert_eq!(tasks[1].url, None);
        assert!(tasks.iter().all(|t| t.output.is_none()));
    }

    #[test]
    fn test_extra_fields_survive_parsing() {
        let raw = r#"[{"agent":"LinkedIn","label":"x","prompt":"y","notes":"keep me"}]"#;
        let tasks = parse_task_list(raw).unwrap();
        assert_eq!(
            tasks[0].extra.get("notes").and_then(|v| v.as_str()),
            Some("keep me")
        );
    }

    #[test]
    fn test_malformed_outputs_fail() {
        assert_eq!(parse_task_list("```json\n```"), Err(ExtractError::Empty));
        assert!(matches!(
            parse_task_list("I could not plan this."),
            Err(ExtractError::Malformed(_))
        ));
        assert!(matches!(
            parse_task_list(r#"{"agent":"LinkedIn","label":"x","prompt":"y"}"#),
            Err(ExtractError::Malformed(_))
        ));
        assert!(matches!(
            parse_task_list(r#"[{"agent":"LinkedIn","label":"x"}]"#),
            Err(ExtractError::Malformed(msg)) if msg.contains("prompt")
        ));
    }
}
