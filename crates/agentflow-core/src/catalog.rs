//! Agent catalog
//!
//! The fixed set of named agents the planner may assign work to. Built once
//! from configuration and shared read-only across requests.

use crate::config::AgentConfig;
use serde::Serialize;

/// A named agent and what it can do
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&AgentConfig> for AgentProfile {
    fn from(config: &AgentConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
        }
    }
}

/// Immutable, ordered agent catalog
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<AgentProfile>,
}

impl AgentCatalog {
    /// Build a catalog from agent entries, keeping their order
    pub fn new(agents: Vec<AgentProfile>) -> Self {
        Self { agents }
    }

    pub fn from_config(agents: &[AgentConfig]) -> Self {
        Self::new(agents.iter().map(AgentProfile::from).collect())
    }

    /// Look up an agent by exact name
    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentProfile> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Render `name: description` lines for prompts
    pub fn describe(&self) -> String {
        self.agents
            .iter()
            .map(|a| format!("- {}: {}", a.name, a.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the website each agent should operate on
    pub fn url_rules(&self) -> String {
        self.agents
            .iter()
            .map(|a| match &a.url {
                Some(url) => format!("- {} → {}", a.name, url),
                None => format!("- {} → the most relevant website for the task", a.name),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_agents;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_is_exact() {
        let catalog = AgentCatalog::from_config(&default_agents());
        assert!(catalog.contains("LinkedIn"));
        assert!(!catalog.contains("linkedin"));
        assert!(!catalog.contains("TikTok"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_describe_preserves_order() {
        let catalog = AgentCatalog::new(vec![
            AgentProfile {
                name: "B".into(),
                description: "second letter".into(),
                url: None,
            },
            AgentProfile {
                name: "A".into(),
                description: "first letter".into(),
                url: Some("https://a.test/".into()),
            },
        ]);
        assert_eq!(catalog.describe(), "- B: second letter\n- A: first letter");
        assert_eq!(catalog.names(), vec!["B", "A"]);
        assert!(catalog.url_rules().contains("- A → https://a.test/"));
    }
}
