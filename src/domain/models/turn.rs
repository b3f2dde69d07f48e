//! Input of a single planning turn.

use serde::{Deserialize, Serialize};

/// Author of a context message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Planner,
}

/// One entry of the recent conversation, forwarded to the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ContextMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn planner(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Planner,
            content: content.into(),
        }
    }
}

/// A user utterance to plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Agent to route to; when absent the directory is consulted
    #[serde(default)]
    pub target_agent_name: Option<String>,

    /// Raw user utterance
    pub query: String,

    /// Recent conversation, oldest first
    #[serde(default)]
    pub context: Vec<ContextMessage>,
}

impl TurnRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            target_agent_name: None,
            query: query.into(),
            context: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target_agent(mut self, agent: impl Into<String>) -> Self {
        self.target_agent_name = Some(agent.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Vec<ContextMessage>) -> Self {
        self.context = context;
        self
    }

    /// Target agent, ignoring blank values.
    pub fn target_agent(&self) -> Option<&str> {
        self.target_agent_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_target_agent_is_ignored() {
        let request = TurnRequest::new("Go on").with_target_agent("   ");
        assert!(request.target_agent().is_none());
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request: TurnRequest =
            serde_json::from_str(r#"{"target_agent_name": null, "query": "Go on"}"#).unwrap();
        assert_eq!(request.query, "Go on");
        assert!(request.context.is_empty());
    }
}
