//! Final output of a planning turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::Task;

/// Why a turn ended without tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
    /// Illegal, impossible or empty request.
    UnusableRequest,
    /// Recurring intent without a usable schedule.
    MissingSchedule,
    /// Schedule known, waiting for the user to confirm it.
    UnconfirmedSchedule,
    /// The user declined the pending proposal.
    Declined,
    /// Collaborator failure or internal defect; the user should retry.
    RetryLater,
}

impl PauseReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnusableRequest => "unusable_request",
            Self::MissingSchedule => "missing_schedule",
            Self::UnconfirmedSchedule => "unconfirmed_schedule",
            Self::Declined => "declined",
            Self::RetryLater => "retry_later",
        }
    }
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result returned to the caller at the end of every turn.
///
/// Serialized as strict JSON with exactly `tasks`, `adequate`, `reason` and
/// (when `adequate` is false) `guidance_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningResult {
    pub tasks: Vec<Task>,
    pub adequate: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_message: Option<String>,
}

impl PlanningResult {
    /// Serialize to the compact JSON string handed to the caller.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn guidance(&self) -> Option<&str> {
        self.guidance_message.as_deref()
    }
}
