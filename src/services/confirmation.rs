//! Confirmation state machine.
//!
//! Decides, for one turn, whether the planner resolves tasks or pauses to
//! ask the user something, and what the conversation state becomes. The
//! machine is pure: it reads the stored [`ConversationState`] and the
//! classifier hints and returns a [`Transition`]; the caller persists the
//! new state only after the whole turn succeeds.
//!
//! Phases:
//!
//! ```text
//! Idle ──recurring, no schedule──▶ AwaitingScheduleClarification
//!  │                                   │ schedule supplied
//!  └──recurring + schedule──▶ AwaitingFinalConfirmation ◀┘
//!                                      │ confirmation token
//!                                      ▼
//!                                   Resolved
//! ```
//!
//! A recurring task is only ever created from a stored, validated schedule
//! that the user confirmed.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ConfirmationPhase, ConversationState, PauseReason, PendingProposal, PlannerConfig, ScheduleConfig,
    UnderstandingHints,
};

use super::guidance::{Guidance, Locale};
use super::query_transformer;
use super::schedule_validator;
use super::script::is_cjk;
use super::task_builder::make_title;

/// Built-in confirmation vocabulary.
pub const CONFIRMATION_TOKENS: &[&str] = &[
    "yes", "y", "yeah", "yep", "ok", "okay", "sure", "confirm", "confirmed", "proceed", "go ahead", "是",
    "是的", "好", "好的", "确认", "確認", "继续", "可以", "はい", "네", "oui", "sí", "si", "ja", "да",
];

/// Built-in decline vocabulary.
pub const DECLINE_TOKENS: &[&str] = &[
    "no", "nope", "nah", "cancel", "stop", "decline", "don't", "dont", "不", "不要", "取消", "いいえ",
    "아니요", "non", "nein", "нет",
];

static POLITE_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:thanks|thank you|please|not now|never\s*mind|for now|that's all|谢谢|謝謝|算了|了|吧)")
        .expect("filler pattern is valid")
});

/// Confirmation and decline words, matched against the start of a reply.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    confirm: Vec<String>,
    decline: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

impl Vocabulary {
    pub fn new(extra_confirm: &[String], extra_decline: &[String]) -> Self {
        Self {
            confirm: token_list(CONFIRMATION_TOKENS, extra_confirm),
            decline: token_list(DECLINE_TOKENS, extra_decline),
        }
    }

    /// Whether the reply opens with a confirmation token.
    pub fn is_confirmation(&self, text: &str) -> bool {
        leading_token(&self.confirm, &normalize(text)).is_some()
    }

    /// If the reply opens with a decline token, the content after it with
    /// punctuation and polite filler removed (possibly empty).
    pub fn decline_remainder(&self, text: &str) -> Option<String> {
        let text = normalize(text);
        let rest = leading_token(&self.decline, &text)?;
        Some(strip_filler(rest))
    }
}

fn token_list(builtin: &[&str], extra: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = builtin
        .iter()
        .map(|t| (*t).to_string())
        .chain(extra.iter().map(|t| normalize(t)))
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    tokens.dedup();
    tokens
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{2019}', '\u{2018}'], "'")
        .to_lowercase()
}

/// Match the longest token at the start of `text`, returning the rest.
///
/// Tokens in space-delimited scripts must end on a word boundary. CJK
/// tokens match as a prefix, since the reply usually continues without a
/// break ("确认创建").
fn leading_token<'a>(tokens: &[String], text: &'a str) -> Option<&'a str> {
    let text = text.trim_start_matches(|c: char| !c.is_alphanumeric());
    tokens.iter().find_map(|token| {
        let rest = text.strip_prefix(token.as_str())?;
        let cjk_token = token.chars().last().is_some_and(is_cjk);
        match rest.chars().next() {
            Some(c) if c.is_alphanumeric() && !cjk_token => None,
            _ => Some(rest),
        }
    })
}

fn strip_filler(rest: &str) -> String {
    let mut rest = rest.trim_matches(|c: char| !c.is_alphanumeric()).to_string();
    loop {
        let stripped = POLITE_FILLER.replace(&rest, "");
        let stripped = stripped.trim_matches(|c: char| !c.is_alphanumeric());
        if stripped.len() == rest.len() {
            return rest;
        }
        rest = stripped.to_string();
    }
}

/// What the turn produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass-through one-time task.
    Once { query: String, subject: Option<String> },
    /// Confirmed recurring task; `query` is already transformed.
    Recurring {
        original_query: String,
        query: String,
        title: String,
        schedule: ScheduleConfig,
    },
    /// No tasks this turn; ask the user.
    Pause {
        pause: PauseReason,
        reason: String,
        guidance: String,
    },
}

impl Decision {
    /// Query used to route the turn to an agent.
    pub fn routing_query(&self) -> Option<&str> {
        match self {
            Self::Once { query, .. } => Some(query),
            Self::Recurring { original_query, .. } => Some(original_query),
            Self::Pause { .. } => None,
        }
    }
}

/// Outcome of the state machine for one turn.
#[derive(Debug, Clone)]
pub struct Transition {
    pub decision: Decision,
    pub next_state: ConversationState,
    pub locale: Locale,
}

impl Transition {
    /// Phase reached at the end of the turn.
    pub fn phase(&self) -> ConfirmationPhase {
        match self.decision {
            Decision::Once { .. } | Decision::Recurring { .. } => ConfirmationPhase::Resolved,
            Decision::Pause { .. } => self.next_state.phase(),
        }
    }
}

/// The confirmation state machine.
#[derive(Debug, Clone)]
pub struct ConfirmationMachine {
    vocabulary: Vocabulary,
    default_locale: String,
}

impl Default for ConfirmationMachine {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl ConfirmationMachine {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            vocabulary: Vocabulary::new(&config.extra_confirmation_tokens, &config.extra_decline_tokens),
            default_locale: config.default_locale.clone(),
        }
    }

    /// Decide the turn given the stored state and the classifier hints.
    pub fn decide(
        &self,
        state: &ConversationState,
        query: &str,
        hints: &UnderstandingHints,
    ) -> DomainResult<Transition> {
        let query = query.trim();
        // A pending proposal keeps the language the conversation started in.
        let fallback = state.locale.as_deref().unwrap_or(&self.default_locale);
        let locale = Locale::detect(hints.locale.as_deref(), query, fallback);
        let guidance = Guidance::new(locale);

        let phase = state.phase();
        debug!(phase = %phase, "deciding turn");

        let proposal = match phase {
            ConfirmationPhase::Idle | ConfirmationPhase::Resolved => None,
            _ => state.proposal(),
        };
        let Some(proposal) = proposal else {
            return self.idle(query, hints, guidance);
        };

        if hints.new_request {
            debug!("new request discards pending proposal");
            return self.idle(query, hints, guidance);
        }

        match phase {
            ConfirmationPhase::AwaitingScheduleClarification => {
                self.awaiting_schedule(state, &proposal, query, hints, guidance)
            }
            ConfirmationPhase::AwaitingFinalConfirmation => match state.pending_schedule {
                Some(schedule) => self.awaiting_confirmation(state, &proposal, schedule, query, hints, guidance),
                None => self.idle(query, hints, guidance),
            },
            ConfirmationPhase::Idle | ConfirmationPhase::Resolved => self.idle(query, hints, guidance),
        }
    }

    fn idle(&self, query: &str, hints: &UnderstandingHints, guidance: Guidance) -> DomainResult<Transition> {
        if query.is_empty() {
            return Ok(pause(
                ConversationState::new(),
                guidance,
                PauseReason::UnusableRequest,
                "Empty request",
                guidance.empty_request(),
            ));
        }

        if let Some(unusable) = &hints.unusable {
            let message = unusable
                .guidance
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map_or_else(|| guidance.unusable(), ToString::to_string);
            return Ok(pause(
                ConversationState::new(),
                guidance,
                PauseReason::UnusableRequest,
                format!("Request cannot be carried out: {}", unusable.reason),
                message,
            ));
        }

        if !hints.recurring_intent || hints.one_time {
            return Ok(Transition {
                decision: Decision::Once {
                    query: query.to_string(),
                    subject: hints.subject.clone(),
                },
                next_state: ConversationState::new(),
                locale: guidance.locale(),
            });
        }

        let schedule_phrase = hints.schedule_hint().and_then(|h| h.phrase_for_removal());
        // The title names the action, not its schedule or delivery.
        let core = query_transformer::transform(query, schedule_phrase.as_deref(), &hints.notification_verbs);
        let proposal = PendingProposal {
            original_query: query.to_string(),
            title: make_title(&core, hints.subject.as_deref())?,
            schedule: None,
            schedule_phrase,
            notification_verbs: hints.notification_verbs.clone(),
        };
        Ok(self.propose(proposal, schedule_validator::validate_optional(hints.schedule_hint()), guidance))
    }

    fn awaiting_schedule(
        &self,
        state: &ConversationState,
        proposal: &PendingProposal,
        query: &str,
        hints: &UnderstandingHints,
        guidance: Guidance,
    ) -> DomainResult<Transition> {
        if hints.one_time {
            debug!("one-time run chosen over recurring monitoring");
            return Ok(Transition {
                decision: Decision::Once {
                    query: proposal.original_query.clone(),
                    subject: None,
                },
                next_state: ConversationState::new(),
                locale: guidance.locale(),
            });
        }

        if let Some(hint) = hints.schedule_hint() {
            let mut proposal = proposal.clone();
            proposal.schedule_phrase = hint.phrase_for_removal();
            merge_verbs(&mut proposal.notification_verbs, &hints.notification_verbs);
            return Ok(self.propose(proposal, schedule_validator::validate(hint), guidance));
        }

        if self.is_decline(query, hints) {
            return Ok(declined(proposal, guidance));
        }

        // Nothing usable: ask again. A recurring task never starts without
        // a schedule, so bare confirmations land here too.
        Ok(pause(
            state.clone(),
            guidance,
            PauseReason::MissingSchedule,
            "Recurring intent detected but no schedule specified",
            guidance.ask_schedule(&proposal.title),
        ))
    }

    fn awaiting_confirmation(
        &self,
        state: &ConversationState,
        proposal: &PendingProposal,
        schedule: ScheduleConfig,
        query: &str,
        hints: &UnderstandingHints,
        guidance: Guidance,
    ) -> DomainResult<Transition> {
        let new_schedule = hints.schedule_hint().is_some();

        if self.vocabulary.is_confirmation(query) && !new_schedule && !hints.declined {
            let transformed = query_transformer::transform(
                &proposal.original_query,
                proposal.schedule_phrase.as_deref(),
                &proposal.notification_verbs,
            );
            debug!(query = %transformed, schedule = %schedule, "recurring task confirmed");
            return Ok(Transition {
                decision: Decision::Recurring {
                    original_query: proposal.original_query.clone(),
                    query: transformed,
                    title: proposal.title.clone(),
                    schedule,
                },
                next_state: ConversationState::new(),
                locale: guidance.locale(),
            });
        }

        if hints.one_time && !new_schedule {
            return Ok(Transition {
                decision: Decision::Once {
                    query: proposal.original_query.clone(),
                    subject: None,
                },
                next_state: ConversationState::new(),
                locale: guidance.locale(),
            });
        }

        let remainder = self.vocabulary.decline_remainder(query);
        let declined_now = hints.declined || remainder.is_some();
        let has_content = remainder.as_deref().is_some_and(|r| !r.is_empty());
        let correction = new_schedule || (declined_now && (has_content || hints.amends_pending));

        if declined_now && !correction {
            return Ok(declined(proposal, guidance));
        }

        if correction {
            // A reply that only carries a schedule can only refer to the
            // pending task.
            let amends = hints.amends_pending || (new_schedule && !hints.recurring_intent);
            debug!(amends, "correction re-enters idle");
            if amends {
                let mut amended = hints.clone();
                amended.recurring_intent = true;
                amended.one_time = false;
                amended.declined = false;
                if amended.subject.is_none() {
                    amended.subject = Some(proposal.title.clone());
                }
                merge_verbs(&mut amended.notification_verbs, &proposal.notification_verbs);
                return self.idle(&proposal.original_query, &amended, guidance);
            }
            let mut fresh = hints.clone();
            fresh.declined = false;
            return self.idle(query, &fresh, guidance);
        }

        // Ambiguous reply: repeat the question and keep the proposal.
        Ok(pause(
            state.clone(),
            guidance,
            PauseReason::UnconfirmedSchedule,
            format!("Awaiting confirmation of schedule: {}", schedule.describe()),
            guidance.confirm_schedule(&proposal.title, &schedule),
        ))
    }

    fn propose(
        &self,
        proposal: PendingProposal,
        schedule: DomainResult<ScheduleConfig>,
        guidance: Guidance,
    ) -> Transition {
        match schedule {
            Ok(schedule) => {
                let message = guidance.confirm_schedule(&proposal.title, &schedule);
                pause(
                    ConversationState::awaiting_confirmation(&proposal, schedule, message.clone())
                        .with_locale(guidance.locale().as_str()),
                    guidance,
                    PauseReason::UnconfirmedSchedule,
                    format!("Recurring task proposed with schedule: {}", schedule.describe()),
                    message,
                )
            }
            Err(DomainError::InvalidSchedule(why)) => {
                let message = guidance.invalid_schedule(&proposal.title, &why);
                pause(
                    ConversationState::awaiting_schedule(&proposal, message.clone())
                        .with_locale(guidance.locale().as_str()),
                    guidance,
                    PauseReason::MissingSchedule,
                    format!("Schedule rejected: {why}"),
                    message,
                )
            }
            Err(_) => {
                let message = guidance.ask_schedule(&proposal.title);
                pause(
                    ConversationState::awaiting_schedule(&proposal, message.clone())
                        .with_locale(guidance.locale().as_str()),
                    guidance,
                    PauseReason::MissingSchedule,
                    "Recurring intent detected but no schedule specified",
                    message,
                )
            }
        }
    }

    fn is_decline(&self, query: &str, hints: &UnderstandingHints) -> bool {
        hints.declined || self.vocabulary.decline_remainder(query).is_some()
    }
}

fn pause(
    next_state: ConversationState,
    guidance: Guidance,
    pause: PauseReason,
    reason: impl Into<String>,
    message: String,
) -> Transition {
    Transition {
        decision: Decision::Pause {
            pause,
            reason: reason.into(),
            guidance: message,
        },
        next_state,
        locale: guidance.locale(),
    }
}

fn declined(proposal: &PendingProposal, guidance: Guidance) -> Transition {
    pause(
        ConversationState::new(),
        guidance,
        PauseReason::Declined,
        "User declined the pending task",
        guidance.declined(&proposal.title),
    )
}

fn merge_verbs(into: &mut Vec<String>, from: &[String]) {
    for verb in from {
        if !into.iter().any(|v| v.eq_ignore_ascii_case(verb)) {
            into.push(verb.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ScheduleHint;

    fn machine() -> ConfirmationMachine {
        ConfirmationMachine::default()
    }

    fn pending_confirmation() -> ConversationState {
        let hints = UnderstandingHints::recurring(Some(ScheduleHint::raw("daily at 9 AM")));
        machine()
            .decide(&ConversationState::new(), "Monitor Apple's quarterly earnings", &hints)
            .unwrap()
            .next_state
    }

    fn pause_reason(transition: &Transition) -> Option<PauseReason> {
        match &transition.decision {
            Decision::Pause { pause, .. } => Some(*pause),
            _ => None,
        }
    }

    #[test]
    fn test_vocabulary_matches_leading_token_only() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_confirmation("Yes, confirmed"));
        assert!(vocab.is_confirmation("  OK"));
        assert!(vocab.is_confirmation("go ahead please"));
        assert!(vocab.is_confirmation("好的，确认"));
        assert!(vocab.is_confirmation("好的确认"));
        assert!(vocab.is_confirmation("确认创建"));
        assert!(vocab.is_confirmation("是的没问题"));
        assert!(vocab.is_confirmation("可以的"));
        assert!(!vocab.is_confirmation("yesterday's close"));
        assert!(!vocab.is_confirmation("Recurring, check daily at 9 AM"));
    }

    #[test]
    fn test_decline_remainder_strips_filler() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.decline_remainder("No thanks").as_deref(), Some(""));
        assert_eq!(vocab.decline_remainder("nope.").as_deref(), Some(""));
        assert_eq!(
            vocab.decline_remainder("No, make it hourly").as_deref(),
            Some("make it hourly")
        );
        assert!(vocab.decline_remainder("notify me").is_none());
    }

    #[test]
    fn test_cjk_decline_matches_as_prefix() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.decline_remainder("不要了").as_deref(), Some(""));
        assert_eq!(vocab.decline_remainder("取消吧").as_deref(), Some(""));
        assert_eq!(vocab.decline_remainder("不要，改成每天").as_deref(), Some("改成每天"));
        assert!(vocab.decline_remainder("nothing").is_none());
    }

    #[test]
    fn test_extra_tokens_are_accepted() {
        let vocab = Vocabulary::new(&["Absolutely".to_string()], &["Nix".to_string()]);
        assert!(vocab.is_confirmation("absolutely!"));
        assert!(vocab.decline_remainder("nix").is_some());
    }

    #[test]
    fn test_idle_pass_through_keeps_confirmation_words() {
        let transition = machine()
            .decide(&ConversationState::new(), "yes", &UnderstandingHints::plain())
            .unwrap();
        assert_eq!(
            transition.decision,
            Decision::Once {
                query: "yes".to_string(),
                subject: None
            }
        );
        assert_eq!(transition.phase(), ConfirmationPhase::Resolved);
    }

    #[test]
    fn test_idle_recurring_without_schedule_asks() {
        let transition = machine()
            .decide(
                &ConversationState::new(),
                "Monitor Apple's quarterly earnings",
                &UnderstandingHints::recurring(None),
            )
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::MissingSchedule));
        assert_eq!(transition.phase(), ConfirmationPhase::AwaitingScheduleClarification);
        assert!(transition.next_state.pending_schedule.is_none());
    }

    #[test]
    fn test_idle_invalid_schedule_routes_to_clarification() {
        let hint = ScheduleHint {
            interval_phrase: Some("every 2 hours".to_string()),
            clock_phrase: Some("9 AM".to_string()),
            raw_text: None,
        };
        let transition = machine()
            .decide(
                &ConversationState::new(),
                "Check gold price every 2 hours at 9 AM",
                &UnderstandingHints::recurring(Some(hint)),
            )
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::MissingSchedule));
        assert!(transition.next_state.awaiting_schedule);
    }

    #[test]
    fn test_unusable_clears_state() {
        let transition = machine()
            .decide(
                &pending_confirmation(),
                "Hack my neighbour's wifi",
                &UnderstandingHints::unusable("illegal", None).as_new_request(),
            )
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::UnusableRequest));
        assert_eq!(transition.next_state.phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_bare_confirmation_while_awaiting_schedule_asks_again() {
        let state = machine()
            .decide(
                &ConversationState::new(),
                "Monitor Apple's quarterly earnings",
                &UnderstandingHints::recurring(None),
            )
            .unwrap()
            .next_state;
        let transition = machine().decide(&state, "yes", &UnderstandingHints::plain()).unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::MissingSchedule));
        assert_eq!(transition.next_state, state);
    }

    #[test]
    fn test_one_time_choice_runs_stored_query_once() {
        let state = machine()
            .decide(
                &ConversationState::new(),
                "Monitor Apple's quarterly earnings",
                &UnderstandingHints::recurring(None),
            )
            .unwrap()
            .next_state;
        let transition = machine()
            .decide(&state, "just once please", &UnderstandingHints::plain().as_one_time())
            .unwrap();
        assert_eq!(
            transition.decision.routing_query(),
            Some("Monitor Apple's quarterly earnings")
        );
        assert!(matches!(transition.decision, Decision::Once { .. }));
    }

    #[test]
    fn test_confirmation_builds_transformed_recurring_decision() {
        let transition = machine()
            .decide(&pending_confirmation(), "Yes, confirmed", &UnderstandingHints::plain())
            .unwrap();
        match transition.decision {
            Decision::Recurring { query, schedule, .. } => {
                assert_eq!(query, "Monitor Apple's quarterly earnings");
                assert_eq!(schedule.daily_time().as_deref(), Some("09:00"));
            }
            other => panic!("expected recurring decision, got {other:?}"),
        }
        assert_eq!(transition.next_state.phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_chinese_confirmation_without_punctuation_resolves() {
        let hints = UnderstandingHints::recurring(Some(ScheduleHint::interval("每小时")));
        let state = machine()
            .decide(&ConversationState::new(), "每小时监控特斯拉股价", &hints)
            .unwrap()
            .next_state;
        assert_eq!(state.phase(), ConfirmationPhase::AwaitingFinalConfirmation);

        for reply in ["确认创建", "好的确认"] {
            let transition = machine().decide(&state, reply, &UnderstandingHints::plain()).unwrap();
            match transition.decision {
                Decision::Recurring { query, schedule, .. } => {
                    assert_eq!(query, "监控特斯拉股价");
                    assert_eq!(schedule, ScheduleConfig::Interval(60));
                }
                other => panic!("expected recurring decision for {reply:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_recurring_title_drops_schedule_and_notification() {
        let hints = UnderstandingHints::recurring(Some(ScheduleHint::interval("every hour")))
            .with_notification_verbs(["alert me"]);
        let transition = machine()
            .decide(
                &ConversationState::new(),
                "Check Tesla stock price every hour and alert me if there's significant change",
                &hints,
            )
            .unwrap();
        let title = transition.next_state.pending_title.unwrap();
        assert_eq!(title, "Check Tesla stock price for significant change");
        match transition.decision {
            Decision::Pause { guidance, .. } => assert!(guidance.contains(&title), "{guidance}"),
            other => panic!("expected pause, got {other:?}"),
        }
    }

    #[test]
    fn test_long_recurring_query_uses_subject_hint_for_title() {
        let query = "Keep an eye on the share prices of the five largest European car makers and \
                     tell me when any of them drops sharply every morning at 8";
        let hints = UnderstandingHints::recurring(Some(ScheduleHint::clock("8")))
            .with_subject("European car maker share prices");
        let transition = machine().decide(&ConversationState::new(), query, &hints).unwrap();
        assert_eq!(
            transition.next_state.pending_title.as_deref(),
            Some("European car maker share prices")
        );
    }

    #[test]
    fn test_session_locale_survives_latin_reply() {
        let hints = UnderstandingHints::recurring(Some(ScheduleHint::interval("每小时")));
        let state = machine()
            .decide(&ConversationState::new(), "每小时监控特斯拉股价", &hints)
            .unwrap()
            .next_state;
        assert_eq!(state.locale.as_deref(), Some("zh"));

        let ambiguous = machine().decide(&state, "hmm", &UnderstandingHints::plain()).unwrap();
        assert_eq!(ambiguous.locale, Locale::Zh);

        let declined = machine().decide(&state, "no", &UnderstandingHints::plain()).unwrap();
        assert_eq!(declined.locale, Locale::Zh);
        assert_eq!(pause_reason(&declined), Some(PauseReason::Declined));
    }

    #[test]
    fn test_pure_decline_clears_state() {
        let transition = machine()
            .decide(&pending_confirmation(), "No thanks", &UnderstandingHints::plain())
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::Declined));
        assert_eq!(transition.next_state.phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_correction_with_new_schedule_reproposes() {
        let hints = UnderstandingHints::schedule_only(ScheduleHint::interval("hourly")).amending_pending();
        let transition = machine()
            .decide(&pending_confirmation(), "No, make it hourly", &hints)
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::UnconfirmedSchedule));
        assert_eq!(transition.next_state.pending_schedule, Some(ScheduleConfig::Interval(60)));
        assert_eq!(
            transition.next_state.pending_original_query.as_deref(),
            Some("Monitor Apple's quarterly earnings")
        );
    }

    #[test]
    fn test_schedule_only_reply_amends_pending_task() {
        let hints = UnderstandingHints::schedule_only(ScheduleHint::interval("every 2 hours"));
        let transition = machine()
            .decide(&pending_confirmation(), "every 2 hours instead", &hints)
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::UnconfirmedSchedule));
        assert_eq!(transition.next_state.pending_schedule, Some(ScheduleConfig::Interval(120)));
        assert_eq!(
            transition.next_state.pending_original_query.as_deref(),
            Some("Monitor Apple's quarterly earnings")
        );
    }

    #[test]
    fn test_correction_without_schedule_drops_stored_schedule() {
        let hints = UnderstandingHints::plain().as_decline().amending_pending();
        let transition = machine()
            .decide(&pending_confirmation(), "No, not that time", &hints)
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::MissingSchedule));
        assert!(transition.next_state.pending_schedule.is_none());
        assert!(transition.next_state.awaiting_schedule);
    }

    #[test]
    fn test_ambiguous_reply_reissues_confirmation() {
        let state = pending_confirmation();
        let transition = machine()
            .decide(&state, "hmm, what does that mean", &UnderstandingHints::plain())
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::UnconfirmedSchedule));
        assert_eq!(transition.next_state, state);
    }

    #[test]
    fn test_new_request_discards_pending() {
        let transition = machine()
            .decide(
                &pending_confirmation(),
                "What was Tesla's Q3 2024 revenue?",
                &UnderstandingHints::plain().as_new_request(),
            )
            .unwrap();
        assert_eq!(
            transition.decision,
            Decision::Once {
                query: "What was Tesla's Q3 2024 revenue?".to_string(),
                subject: None
            }
        );
        assert_eq!(transition.next_state.phase(), ConfirmationPhase::Idle);
    }

    #[test]
    fn test_empty_query_is_unusable() {
        let transition = machine()
            .decide(&ConversationState::new(), "   ", &UnderstandingHints::plain())
            .unwrap();
        assert_eq!(pause_reason(&transition), Some(PauseReason::UnusableRequest));
    }
}
