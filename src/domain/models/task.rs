//! Executable task produced by the planner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::schedule::ScheduleConfig;

/// Whether a task runs once or on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPattern {
    Once,
    Recurring,
}

impl TaskPattern {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Recurring => "recurring",
        }
    }
}

impl fmt::Display for TaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "recurring" => Ok(Self::Recurring),
            _ => Err(anyhow::anyhow!("Invalid task pattern: {s}")),
        }
    }
}

/// A single executable task routed to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Short title, bounded by the title rules
    pub title: String,

    /// Query forwarded to the agent
    pub query: String,

    /// Target agent name
    pub agent_name: String,

    /// Execution pattern
    pub pattern: TaskPattern,

    /// Schedule, present iff `pattern` is recurring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_config: Option<ScheduleConfig>,
}

impl Task {
    pub const fn is_recurring(&self) -> bool {
        matches!(self.pattern, TaskPattern::Recurring)
    }
}
