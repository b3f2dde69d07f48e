//! Structured hints produced by the language-understanding collaborator.
//!
//! The planner never parses free text for intent. Everything it needs to
//! know about the utterance arrives here, and the deterministic validators
//! work on these fields.

use serde::{Deserialize, Serialize};

/// Schedule description already reduced to phrases by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleHint {
    /// Interval phrase such as "every hour" or "every 30 minutes"
    #[serde(default)]
    pub interval_phrase: Option<String>,

    /// Clock-time phrase such as "9 AM" or "14:00"
    #[serde(default)]
    pub clock_phrase: Option<String>,

    /// Raw schedule text, scanned when neither phrase is present
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl ScheduleHint {
    pub fn interval(phrase: impl Into<String>) -> Self {
        Self {
            interval_phrase: Some(phrase.into()),
            ..Self::default()
        }
    }

    pub fn clock(phrase: impl Into<String>) -> Self {
        Self {
            clock_phrase: Some(phrase.into()),
            ..Self::default()
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Whether no phrase and no raw text were supplied.
    pub fn is_empty(&self) -> bool {
        [&self.interval_phrase, &self.clock_phrase, &self.raw_text]
            .iter()
            .all(|field| field.as_deref().is_none_or(|s| s.trim().is_empty()))
    }

    /// Text to strip from the query when the task is finalized. The
    /// narrowest phrase wins; raw text is the last resort.
    pub fn phrase_for_removal(&self) -> Option<String> {
        self.interval_phrase
            .as_deref()
            .or(self.clock_phrase.as_deref())
            .or(self.raw_text.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}

/// Classifier verdict that the request cannot be served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusableHint {
    /// Short internal reason
    pub reason: String,

    /// User-facing explanation, in the user's language
    #[serde(default)]
    pub guidance: Option<String>,
}

/// Everything the classifier extracted from one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderstandingHints {
    /// The user wants something to happen repeatedly
    #[serde(default)]
    pub recurring_intent: bool,

    /// Schedule mentioned in this utterance
    #[serde(default)]
    pub schedule: Option<ScheduleHint>,

    /// Notification verb spans, e.g. "alert me"
    #[serde(default)]
    pub notification_verbs: Vec<String>,

    /// Set when the request is illegal or impossible
    #[serde(default)]
    pub unusable: Option<UnusableHint>,

    /// The utterance is an unrelated new request
    #[serde(default)]
    pub new_request: bool,

    /// The user picked a one-time run over recurring monitoring
    #[serde(default)]
    pub one_time: bool,

    /// The user declined the pending proposal
    #[serde(default)]
    pub declined: bool,

    /// A correction that amends the pending task rather than replacing it
    #[serde(default)]
    pub amends_pending: bool,

    /// Core subject, used for titles of long queries
    #[serde(default)]
    pub subject: Option<String>,

    /// Language of the utterance, e.g. "en" or "zh"
    #[serde(default)]
    pub locale: Option<String>,
}

impl UnderstandingHints {
    /// Hints for an ordinary one-off request.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Hints for a recurring request, optionally with a schedule.
    pub fn recurring(schedule: Option<ScheduleHint>) -> Self {
        Self {
            recurring_intent: true,
            schedule,
            ..Self::default()
        }
    }

    /// Hints for an utterance that only carries a schedule.
    pub fn schedule_only(schedule: ScheduleHint) -> Self {
        Self {
            schedule: Some(schedule),
            ..Self::default()
        }
    }

    pub fn unusable(reason: impl Into<String>, guidance: Option<String>) -> Self {
        Self {
            unusable: Some(UnusableHint {
                reason: reason.into(),
                guidance,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_notification_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notification_verbs = verbs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub const fn as_new_request(mut self) -> Self {
        self.new_request = true;
        self
    }

    #[must_use]
    pub const fn as_decline(mut self) -> Self {
        self.declined = true;
        self
    }

    #[must_use]
    pub const fn as_one_time(mut self) -> Self {
        self.one_time = true;
        self
    }

    #[must_use]
    pub const fn amending_pending(mut self) -> Self {
        self.amends_pending = true;
        self
    }

    /// Schedule hint, if one with any content was supplied.
    pub fn schedule_hint(&self) -> Option<&ScheduleHint> {
        self.schedule.as_ref().filter(|hint| !hint.is_empty())
    }
}
