//! Planner stage
//!
//! Asks the model to break the user's goal into tasks for catalog agents.

use crate::catalog::AgentCatalog;
use crate::llm::ChatMessage;

const TASK_FORMAT: &str = r#"```json
[
  {
    "agent": "string",
    "label": "string",
    "prompt": "string",
    "url": "string"
  }
]
```"#;

/// Render the planning prompt for `goal`
pub fn build_planner_prompt(goal: &str, catalog: &AgentCatalog) -> String {
    format!(
        "Goal: {goal}\n\n\
         Break this goal into smaller tasks, each handled by exactly one of these agents:\n\
         {agents}\n\n\
         Be as specific as possible, and say exactly what each agent should do in detailed steps. \
         An example is step 1: navigate to (sample.url), step 2: search for X, etc.\n\
         The information produced by one agent can go into another.\n\n\
         For each task, return an object with:\n\
         - agent (one of: {names})\n\
         - label (a short display name)\n\
         - prompt (the detailed instructions)\n\
         - url (the primary website the agent should operate on)\n\n\
         Rules for url:\n\
         {url_rules}\n\n\
         Format the output exactly like this:\n\
         {format}\n\n\
         Do not include anything else.",
        goal = goal,
        agents = catalog.describe(),
        names = catalog.names().join(", "),
        url_rules = catalog.url_rules(),
        format = TASK_FORMAT,
    )
}

/// Build the messages for the planning call
pub fn build_planner_messages(goal: &str, catalog: &AgentCatalog) -> Vec<ChatMessage> {
    vec![ChatMessage::user(build_planner_prompt(goal, catalog))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_agents;

    #[test]
    fn test_prompt_embeds_goal_and_catalog() {
        let catalog = AgentCatalog::from_config(&default_agents());
        let prompt = build_planner_prompt("Hire 3 backend engineers", &catalog);

        assert!(prompt.starts_with("Goal: Hire 3 backend engineers"));
        for agent in catalog.iter() {
            assert!(prompt.contains(&agent.name));
            assert!(prompt.contains(&agent.description));
        }
        assert!(prompt.contains("- LinkedIn → https://www.linkedin.com/"));
        assert!(prompt.contains("\"url\": \"string\""));
        assert!(prompt.ends_with("Do not include anything else."));
    }

    #[test]
    fn test_single_user_message() {
        let catalog = AgentCatalog::from_config(&default_agents());
        let messages = build_planner_messages("x", &catalog);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, crate::llm::Role::User);
    }
}
