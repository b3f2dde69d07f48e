//! Per-session conversation state projection.
//!
//! The caller persists this value between turns. The planner only reads the
//! pending-proposal fields and returns a replacement at the end of a
//! successful turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schedule::ScheduleConfig;

/// Where a session sits in the confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPhase {
    /// No pending proposal.
    Idle,
    /// Recurring intent seen, waiting for the user to give a schedule.
    AwaitingScheduleClarification,
    /// Schedule known, waiting for an explicit confirmation.
    AwaitingFinalConfirmation,
    /// The turn produced its final answer.
    Resolved,
}

impl ConfirmationPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingScheduleClarification => "awaiting_schedule_clarification",
            Self::AwaitingFinalConfirmation => "awaiting_final_confirmation",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ConfirmationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring task proposal waiting for schedule or confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingProposal {
    pub original_query: String,
    pub title: String,
    pub schedule: Option<ScheduleConfig>,
    pub schedule_phrase: Option<String>,
    pub notification_verbs: Vec<String>,
}

/// Persisted projection of the conversation for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Last guidance message, while a proposal is pending
    #[serde(default)]
    pub pending_guidance: Option<String>,

    /// Query proposed before confirmation
    #[serde(default)]
    pub pending_original_query: Option<String>,

    /// Waiting for the user to supply a schedule
    #[serde(default)]
    pub awaiting_schedule: bool,

    /// Validated schedule waiting for confirmation
    #[serde(default)]
    pub pending_schedule: Option<ScheduleConfig>,

    /// Title computed for the pending proposal
    #[serde(default)]
    pub pending_title: Option<String>,

    /// Schedule phrase detected in the conversation, removed on finalization
    #[serde(default)]
    pub pending_schedule_phrase: Option<String>,

    /// Notification verb spans detected in the original query
    #[serde(default)]
    pub pending_notification_verbs: Vec<String>,

    /// Language of the conversation that raised the proposal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// When the state last changed
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConversationState {
    /// Fresh state for a new session.
    pub fn new() -> Self {
        Self::default()
    }

    /// State recorded when a schedule must be requested.
    pub fn awaiting_schedule(proposal: &PendingProposal, guidance: impl Into<String>) -> Self {
        Self {
            pending_guidance: Some(guidance.into()),
            pending_original_query: Some(proposal.original_query.clone()),
            awaiting_schedule: true,
            pending_schedule: None,
            pending_title: Some(proposal.title.clone()),
            pending_schedule_phrase: None,
            pending_notification_verbs: proposal.notification_verbs.clone(),
            locale: None,
            updated_at: Some(Utc::now()),
        }
    }

    /// State recorded when a schedule is known and must be confirmed.
    pub fn awaiting_confirmation(
        proposal: &PendingProposal,
        schedule: ScheduleConfig,
        guidance: impl Into<String>,
    ) -> Self {
        Self {
            pending_guidance: Some(guidance.into()),
            pending_original_query: Some(proposal.original_query.clone()),
            awaiting_schedule: false,
            pending_schedule: Some(schedule),
            pending_title: Some(proposal.title.clone()),
            pending_schedule_phrase: proposal.schedule_phrase.clone(),
            pending_notification_verbs: proposal.notification_verbs.clone(),
            locale: None,
            updated_at: Some(Utc::now()),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Current phase, derived from the stored fields.
    pub const fn phase(&self) -> ConfirmationPhase {
        if self.awaiting_schedule {
            ConfirmationPhase::AwaitingScheduleClarification
        } else if self.pending_schedule.is_some() {
            ConfirmationPhase::AwaitingFinalConfirmation
        } else {
            ConfirmationPhase::Idle
        }
    }

    /// Whether a proposal is waiting on the user.
    pub const fn has_pending_proposal(&self) -> bool {
        !matches!(self.phase(), ConfirmationPhase::Idle)
    }

    /// The pending proposal, if the stored fields describe one.
    pub fn proposal(&self) -> Option<PendingProposal> {
        if !self.has_pending_proposal() {
            return None;
        }
        let original_query = self.pending_original_query.clone()?;
        Some(PendingProposal {
            title: self
                .pending_title
                .clone()
                .unwrap_or_else(|| original_query.clone()),
            original_query,
            schedule: self.pending_schedule,
            schedule_phrase: self.pending_schedule_phrase.clone(),
            notification_verbs: self.pending_notification_verbs.clone(),
        })
    }
}
