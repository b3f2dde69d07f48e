//! Agent directory entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An enabled agent as reported by the agent directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCard {
    /// Agent name, used verbatim as `Task::agent_name`
    pub name: String,

    /// Free-text description of what the agent does
    #[serde(default)]
    pub description: String,

    /// Advertised skills
    #[serde(default)]
    pub skills: Vec<String>,
}

impl AgentCard {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

/// How the agent for a turn was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSource {
    /// Caller supplied `target_agent_name`
    Target,
    /// Best directory match above the confidence threshold
    Directory,
    /// No confident match; default agent used
    Fallback,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Directory => write!(f, "directory"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The single agent chosen for a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSelection {
    pub agent_name: String,
    pub source: SelectionSource,
    /// Score of the winning candidate, when the directory was consulted
    pub confidence: Option<f64>,
}
