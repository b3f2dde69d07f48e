//! Keyword classifier used when no language model is wired in.
//!
//! Good enough for the CLI and for demos: it spots schedule phrases with the
//! schedule grammar, monitoring verbs, notification phrases and explicit
//! one-time wording. It never flags requests as unusable or as new requests.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ContextMessage, ScheduleHint, UnderstandingHints};
use crate::domain::ports::IntentClassifier;
use crate::services::query_transformer::NOTIFICATION_PHRASES;
use crate::services::schedule_validator;

static RECURRING_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:monitor(?:ing)?|watch|track(?:ing)?|keep an eye on|keep track of|recurring|regularly|periodically|routinely)\b|监控|監控|跟踪|跟蹤|关注|關注|定期|持续|持續",
    )
    .expect("recurring pattern is valid")
});

static ONE_TIME_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:one[-\s]time|just once|only once|once only|one[-\s]off)\b|一次性|只要一次")
        .expect("one-time pattern is valid")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub const fn new() -> Self {
        Self
    }

    /// Classify without any I/O.
    pub fn hints_for(&self, query: &str) -> UnderstandingHints {
        let (interval, clock) = schedule_validator::find_phrases(query);
        let schedule = (interval.is_some() || clock.is_some()).then(|| ScheduleHint {
            interval_phrase: interval,
            clock_phrase: clock,
            raw_text: None,
        });

        let lower = query.to_lowercase();
        let notification_verbs: Vec<String> = NOTIFICATION_PHRASES
            .iter()
            .filter(|phrase| lower.contains(*phrase))
            .map(|phrase| (*phrase).to_string())
            .collect();

        let one_time = ONE_TIME_WORDS.is_match(query);
        let recurring_intent = !one_time && (schedule.is_some() || RECURRING_WORDS.is_match(query));

        UnderstandingHints {
            recurring_intent,
            schedule,
            notification_verbs,
            one_time,
            ..UnderstandingHints::default()
        }
    }
}

#[async_trait]
impl IntentClassifier for RuleBasedClassifier {
    async fn classify(&self, query: &str, _context: &[ContextMessage]) -> DomainResult<UnderstandingHints> {
        Ok(self.hints_for(query))
    }
}
