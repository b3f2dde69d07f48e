//! Query transformation for recurring tasks.
//!
//! A recurring task runs its query once per tick, so the query must read as
//! a single direct action: the schedule lives in `schedule_config` and the
//! scheduler handles delivery. The transformer removes schedule phrases and
//! notification verbs and folds "watch X and tell me if Y" into "Check X
//! for Y".
//!
//! Every rewrite strictly shortens the text and the rules run to a fixpoint,
//! so `transform(transform(q)) == transform(q)`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::script::collapse_whitespace;

/// Notification phrases removed wherever they appear.
pub const NOTIFICATION_PHRASES: &[&str] = &[
    "send me a notification",
    "send me an alert",
    "let me know",
    "notify me",
    "alert me",
    "ping me",
    "remind me",
    "inform me",
    "message me",
    "email me",
    "text me",
    "warn me",
    "通知我",
    "提醒我",
];

/// Bare verbs only recognized inside "… and notify if …".
const CONDITIONAL_VERBS: &[&str] = &["notify", "alert", "warn"];

const MONITOR_VERBS: &str = "monitor|watch|track|keep an eye on|keep track of|keep watching";
const CONDITIONS: &str = "if|when|whenever|once|in case";

static BUILTIN_SCHEDULE: LazyLock<Regex> = LazyLock::new(|| {
    let clock = r"(?:\d{1,2}(?::\d{2})?\s*(?:[ap]\.?\s*m\b\.?)?|noon|midnight)";
    let units = r"(?:minutes?|mins?|hours?|hrs?|days?|weeks?)";
    let count = r"(?:\d+\s*|(?:a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|other)\s+|half(?:\s+an?)?\s+)";
    Regex::new(&format!(
        r"(?i)\b(?:every|each)\s+{count}?{units}\b(?:'s)?(?:\s+at\s+{clock})?|\b(?:daily|every\s+day|each\s+day)\s+at\s+{clock}|\bat\s+{clock}\s+(?:daily|every\s+day|each\s+day)\b|每\s*\d*\s*个?\s*(?:分钟|分鐘|小时|小時|天|日|周|週|星期)(?:\s*(?:上午|早上|凌晨|中午|下午|晚上)?\s*\d{{1,2}}\s*[点點时時](?:半|\d{{1,2}}分)?)?"
    ))
    .expect("schedule pattern is valid")
});

static TRAILING_FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:hourly|daily|weekly)([.!?]?)\s*$").expect("frequency pattern is valid")
});

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?;:，。！？])").expect("punctuation pattern is valid"));

static DANGLING_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[\s,;:，]+(?:and|or|then|at)\b|[\s,;:，]+|\s*(?:并且|并|然后))+([.!?。]?)$")
        .expect("tail pattern is valid")
});

static DANGLING_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:and|then|please)\s+|[,;:]\s*)+").expect("head pattern is valid")
});

static CONDITION_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:there(?:'s|\s+is|\s+are|\s+has\s+been|\s+have\s+been)|it(?:'s|\s+is))\s+")
        .expect("filler pattern is valid")
});

/// Transform a recurring query into single-execution form.
///
/// `schedule_phrase` and `notification_verbs` come from the classifier;
/// the built-in vocabularies are always applied as well.
pub fn transform(query: &str, schedule_phrase: Option<&str>, notification_verbs: &[String]) -> String {
    let original = query.trim();
    let rules = Rules::new(schedule_phrase, notification_verbs);

    let mut current = original.to_string();
    // Each changing pass shortens the text or only normalizes whitespace,
    // so this bound is never reached in practice.
    for _ in 0..=original.chars().count() + 1 {
        let next = rules.pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() {
        return original.to_string();
    }
    if current != original {
        capitalize_first(&mut current);
    }
    current
}

struct Rules {
    schedule_phrase: Option<Regex>,
    verbs: Option<Regex>,
    monitor_notify: Option<Regex>,
    leading_notify: Option<Regex>,
}

impl Rules {
    fn new(schedule_phrase: Option<&str>, notification_verbs: &[String]) -> Self {
        let mut phrases: Vec<String> = NOTIFICATION_PHRASES.iter().map(|s| (*s).to_string()).collect();
        for verb in notification_verbs {
            let verb = collapse_whitespace(verb).to_lowercase();
            if !verb.is_empty() && !phrases.contains(&verb) {
                phrases.push(verb);
            }
        }
        // Longest first so "send me an alert" wins over "alert me".
        phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

        let removable = alternation(&phrases);
        let conditional = alternation(
            &phrases
                .iter()
                .cloned()
                .chain(CONDITIONAL_VERBS.iter().map(|s| (*s).to_string()))
                .collect::<Vec<_>>(),
        );

        // Hint verbs are escaped, so these only fail on pathological input;
        // a rule that fails to build is skipped.
        let monitor_notify = Regex::new(&format!(
            r"(?i)^(?:({MONITOR_VERBS})\s+)?(.+?)[\s,]*(?:\band\s+)?(?:\bthen\s+)?(?:{conditional})\s+(?:{CONDITIONS})\s+(.+)$"
        ))
        .ok();

        let leading_notify = Regex::new(&format!(
            r"(?i)^(?:please\s+)?(?:{removable})\s+(?:(about|of|on|regarding)|({CONDITIONS}))\s+(.+)$"
        ))
        .ok();

        let verbs = Regex::new(&format!(r"(?i)[\s,]*(?:\band\s+)?(?:\bthen\s+)?(?:{removable})")).ok();

        let schedule_phrase = schedule_phrase
            .map(collapse_whitespace)
            .filter(|p| !p.is_empty())
            .and_then(|p| {
                let pattern = p
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+");
                Regex::new(&format!("(?i){pattern}")).ok()
            });

        Self {
            schedule_phrase,
            verbs,
            monitor_notify,
            leading_notify,
        }
    }

    /// One pass over the text. The result is never longer than the input.
    fn pass(&self, text: &str) -> String {
        let mut out = text.to_string();

        out = BUILTIN_SCHEDULE
            .replace_all(&out, |caps: &Captures| {
                let matched = &caps[0];
                // "every day's closing price" is content, not a schedule
                if matched.ends_with("'s") {
                    matched.to_string()
                } else {
                    String::new()
                }
            })
            .into_owned();
        out = TRAILING_FREQUENCY.replace(&out, "$1").into_owned();

        if let Some(phrase) = &self.schedule_phrase {
            let removed = phrase.replace_all(&out, "").into_owned();
            if !tidy(&removed).is_empty() {
                out = removed;
            }
        }
        out = tidy(&out);

        if let Some(rewritten) = self.rewrite_monitoring(&out) {
            out = shorter_or(out, rewritten);
        }
        if let Some(rewritten) = self.rewrite_leading(&out) {
            out = shorter_or(out, rewritten);
        }

        if let Some(verbs) = &self.verbs {
            out = verbs.replace_all(&out, "").into_owned();
        }
        tidy(&out)
    }

    /// "Monitor X and notify me if Y" -> "Check X for Y".
    fn rewrite_monitoring(&self, text: &str) -> Option<String> {
        let caps = self.monitor_notify.as_ref()?.captures(text)?;
        let subject = caps.get(2)?.as_str().trim();
        let condition = strip_condition_filler(caps.get(3)?.as_str());
        if subject.is_empty() || condition.is_empty() {
            return None;
        }
        let action = if caps.get(1).is_some() {
            format!("Check {subject}")
        } else {
            subject.to_string()
        };
        Some(format!("{action} for {condition}"))
    }

    /// "Alert me about X" -> "Check X", "Let me know if Y" -> "Check for Y".
    fn rewrite_leading(&self, text: &str) -> Option<String> {
        let caps = self.leading_notify.as_ref()?.captures(text)?;
        let rest = caps.get(3)?.as_str().trim();
        if rest.is_empty() {
            return None;
        }
        if caps.get(1).is_some() {
            Some(format!("Check {rest}"))
        } else {
            Some(format!("Check for {}", strip_condition_filler(rest)))
        }
    }
}

fn alternation(phrases: &[String]) -> String {
    phrases
        .iter()
        .map(|phrase| {
            let body = phrase
                .split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            let starts_word = phrase.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
            let ends_word = phrase.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
            format!(
                "{}{body}{}",
                if starts_word { r"\b" } else { "" },
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn strip_condition_filler(condition: &str) -> String {
    CONDITION_FILLER.replace(condition.trim(), "").trim().to_string()
}

fn shorter_or(current: String, candidate: String) -> String {
    if candidate.chars().count() < current.chars().count() {
        candidate
    } else {
        current
    }
}

/// Whitespace and dangling-connector cleanup. Never lengthens the text.
fn tidy(text: &str) -> String {
    let text = collapse_whitespace(text);
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = DANGLING_TAIL.replace(&text, "$1");
    let text = DANGLING_HEAD.replace(&text, "");
    text.trim().to_string()
}

fn capitalize_first(text: &mut String) {
    if let Some(first) = text.chars().next() {
        if first.is_lowercase() {
            let upper: String = first.to_uppercase().collect();
            if upper.len() == first.len_utf8() {
                text.replace_range(..first.len_utf8(), &upper);
            }
        }
    }
}
