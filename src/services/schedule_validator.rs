//! Schedule validation and normalization.
//!
//! Turns the classifier's schedule phrases into a [`ScheduleConfig`].
//! Clock times are normalized to 24-hour `HH:MM`, intervals to whole
//! minutes. A schedule is never invented: when nothing usable is present
//! the caller gets `MissingSchedule` and must ask the user.

use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ScheduleConfig, ScheduleHint};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;
const MINUTES_PER_WEEK: u64 = 7 * MINUTES_PER_DAY;

const NUMBER_WORDS: &str =
    "a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|other";
const EN_UNITS: &str = "minutes?|mins?|hours?|hrs?|days?|weeks?";
const ZH_UNITS: &str = "分钟|分鐘|小时|小時|天|日|周|週|星期";
const ZH_PERIODS: &str = "上午|早上|凌晨|中午|下午|晚上";

static INTERVAL_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?:every|each)\s+)?(?:(\d+)|({NUMBER_WORDS})|(half)(?:\s+an?)?)?\s*({EN_UNITS})$"
    ))
    .expect("interval pattern is valid")
});

static INTERVAL_ZH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^每\s*(\d+)?\s*个?\s*({ZH_UNITS})$")).expect("interval pattern is valid")
});

static CLOCK_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*([ap])\.?\s*m\.?$").expect("clock pattern is valid")
});

static CLOCK_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[:：](\d{2})$").expect("clock pattern is valid"));

static CLOCK_OCLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})\s*o'?clock$").expect("clock pattern is valid")
});

static CLOCK_ZH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({ZH_PERIODS})?\s*(\d{{1,2}})\s*[点點时時](?:\s*(半)|\s*(\d{{1,2}})\s*分)?$"
    ))
    .expect("clock pattern is valid")
});

static RAW_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(\b\d{{1,2}}(?::\d{{2}})?\s*[ap]\.?\s*m\b\.?|\b\d{{1,2}}:\d{{2}}\b|\bnoon\b|\bmidnight\b|\b\d{{1,2}}\s*o'?clock\b|(?:{ZH_PERIODS})?\s*\d{{1,2}}\s*[点點时時](?:\s*半|\s*\d{{1,2}}\s*分)?)"
    ))
    .expect("raw clock pattern is valid")
});

static RAW_INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(\b(?:every|each)\s+(?:\d+\s*|(?:{NUMBER_WORDS})\s+|half(?:\s+an?)?\s+)?(?:{EN_UNITS})\b|\b(?:hourly|daily|weekly)\b|每\s*\d*\s*个?\s*(?:{ZH_UNITS}))"
    ))
    .expect("raw interval pattern is valid")
});

/// Validate a schedule hint and normalize it into a [`ScheduleConfig`].
///
/// Phrases take precedence over raw text. "daily" (or any one-day interval)
/// combined with a clock time means a daily time; any other interval
/// combined with a clock time is rejected.
pub fn validate(hint: &ScheduleHint) -> DomainResult<ScheduleConfig> {
    let interval_phrase = non_blank(hint.interval_phrase.as_deref());
    let clock_phrase = non_blank(hint.clock_phrase.as_deref());

    let (interval_text, clock_text) = if interval_phrase.is_some() || clock_phrase.is_some() {
        (interval_phrase.map(ToString::to_string), clock_phrase.map(ToString::to_string))
    } else if let Some(raw) = non_blank(hint.raw_text.as_deref()) {
        find_phrases(raw)
    } else {
        return Err(DomainError::MissingSchedule);
    };

    let interval = interval_text.as_deref().map(parse_interval_minutes).transpose()?;
    let clock = clock_text.as_deref().map(parse_clock_time).transpose()?;

    let config = match (interval, clock) {
        (Some(minutes), None) => ScheduleConfig::interval(minutes)?,
        (None, Some(time)) => ScheduleConfig::DailyTime(time),
        (Some(minutes), Some(time)) if u64::from(minutes) == MINUTES_PER_DAY => {
            ScheduleConfig::DailyTime(time)
        }
        (Some(_), Some(_)) => {
            return Err(DomainError::InvalidSchedule(
                "both an interval and a daily time were given".to_string(),
            ))
        }
        (None, None) => return Err(DomainError::MissingSchedule),
    };

    debug!(schedule = %config, "schedule normalized");
    Ok(config)
}

/// Validate an optional hint; absence is `MissingSchedule`.
pub fn validate_optional(hint: Option<&ScheduleHint>) -> DomainResult<ScheduleConfig> {
    hint.map_or(Err(DomainError::MissingSchedule), validate)
}

/// Parse an interval phrase ("every hour", "every 30 minutes", "hourly",
/// "每小时") into minutes.
pub fn parse_interval_minutes(phrase: &str) -> DomainResult<u32> {
    let text = phrase.trim().trim_end_matches(['.', '!', ',', '。']).trim();
    let lower = text.to_lowercase();

    let minutes: u64 = match lower.as_str() {
        "hourly" => MINUTES_PER_HOUR,
        "daily" | "every day" | "each day" | "每天" | "每日" => MINUTES_PER_DAY,
        "weekly" => MINUTES_PER_WEEK,
        _ => {
            if let Some(caps) = INTERVAL_EN.captures(&lower) {
                let count = if let Some(digits) = caps.get(1) {
                    parse_count(digits.as_str(), phrase)?
                } else if let Some(word) = caps.get(2) {
                    number_word(word.as_str())
                } else if caps.get(3).is_some() {
                    // "every half hour"
                    return half_unit(&caps[4], phrase);
                } else {
                    1
                };
                count
                    .checked_mul(en_unit_minutes(&caps[4]))
                    .ok_or_else(|| out_of_range(phrase))?
            } else if let Some(caps) = INTERVAL_ZH.captures(text) {
                let count = match caps.get(1) {
                    Some(digits) => parse_count(digits.as_str(), phrase)?,
                    None => 1,
                };
                count
                    .checked_mul(zh_unit_minutes(&caps[2]))
                    .ok_or_else(|| out_of_range(phrase))?
            } else {
                return Err(DomainError::InvalidSchedule(format!(
                    "could not understand interval '{}'",
                    phrase.trim()
                )));
            }
        }
    };

    if minutes == 0 {
        return Err(DomainError::InvalidSchedule(
            "interval must be a positive number of minutes".to_string(),
        ));
    }
    u32::try_from(minutes).map_err(|_| out_of_range(phrase))
}

/// Parse a clock phrase ("9 AM", "2:30 pm", "14:00", "noon", "下午3点")
/// into a time of day.
pub fn parse_clock_time(phrase: &str) -> DomainResult<NaiveTime> {
    let text = strip_clock_affixes(phrase);
    let lower = text.to_lowercase();

    let (hour, minute) = match lower.as_str() {
        "noon" | "midday" | "中午" => (12, 0),
        "midnight" | "午夜" => (0, 0),
        _ => {
            if let Some(caps) = CLOCK_12H.captures(&lower) {
                let hour: u32 = caps[1].parse().map_err(|_| malformed_time(phrase))?;
                let minute = caps.get(2).map_or(Ok(0), |m| m.as_str().parse::<u32>());
                let minute = minute.map_err(|_| malformed_time(phrase))?;
                if !(1..=12).contains(&hour) {
                    return Err(malformed_time(phrase));
                }
                let pm = caps[3].eq_ignore_ascii_case("p");
                let hour = match (hour, pm) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, true) => h + 12,
                    (h, false) => h,
                };
                (hour, minute)
            } else if let Some(caps) = CLOCK_24H.captures(&lower) {
                let hour = caps[1].parse().map_err(|_| malformed_time(phrase))?;
                let minute = caps[2].parse().map_err(|_| malformed_time(phrase))?;
                (hour, minute)
            } else if let Some(caps) = CLOCK_OCLOCK.captures(&lower) {
                (caps[1].parse().map_err(|_| malformed_time(phrase))?, 0)
            } else if let Some(caps) = CLOCK_ZH.captures(&text) {
                let hour: u32 = caps[2].parse().map_err(|_| malformed_time(phrase))?;
                let minute = if caps.get(3).is_some() {
                    30
                } else {
                    caps.get(4)
                        .map_or(Ok(0), |m| m.as_str().parse::<u32>())
                        .map_err(|_| malformed_time(phrase))?
                };
                let hour = match caps.get(1).map(|m| m.as_str()) {
                    Some("下午" | "晚上") if hour < 12 => hour + 12,
                    Some("中午") if hour < 11 => hour + 12,
                    _ => hour,
                };
                (hour, minute)
            } else {
                return Err(malformed_time(phrase));
            }
        }
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| malformed_time(phrase))
}

/// Find an interval and a clock time in free text.
/// Find the first interval phrase and the first clock phrase in free text.
pub fn find_phrases(raw: &str) -> (Option<String>, Option<String>) {
    let clock = RAW_CLOCK.find(raw).map(|m| m.as_str().trim().to_string());
    let interval = RAW_INTERVAL.find(raw).map(|m| m.as_str().trim().to_string());
    (interval, clock)
}

fn strip_clock_affixes(phrase: &str) -> String {
    const PREFIXES: [&str; 6] = ["every day at ", "each day at ", "daily at ", "at ", "每天", "每日"];
    const SUFFIXES: [&str; 3] = [" every day", " each day", " daily"];

    let mut text = phrase.trim().trim_end_matches(['.', '!', ',', '。']).trim().to_string();
    loop {
        let lower = text.to_lowercase();
        let before = text.len();
        for prefix in PREFIXES {
            if lower.starts_with(prefix) && text.is_char_boundary(prefix.len()) {
                text = text[prefix.len()..].trim_start().to_string();
                break;
            }
        }
        let lower = text.to_lowercase();
        for suffix in SUFFIXES {
            if lower.ends_with(suffix) && text.is_char_boundary(text.len() - suffix.len()) {
                text.truncate(text.len() - suffix.len());
                text = text.trim_end().to_string();
                break;
            }
        }
        if text.len() == before {
            return text;
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_count(digits: &str, phrase: &str) -> DomainResult<u64> {
    digits.parse().map_err(|_| out_of_range(phrase))
}

fn number_word(word: &str) -> u64 {
    match word {
        "two" | "other" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => 1,
    }
}

fn en_unit_minutes(unit: &str) -> u64 {
    if unit.starts_with("min") {
        1
    } else if unit.starts_with('h') {
        MINUTES_PER_HOUR
    } else if unit.starts_with('d') {
        MINUTES_PER_DAY
    } else {
        MINUTES_PER_WEEK
    }
}

fn zh_unit_minutes(unit: &str) -> u64 {
    match unit {
        "分钟" | "分鐘" => 1,
        "小时" | "小時" => MINUTES_PER_HOUR,
        "天" | "日" => MINUTES_PER_DAY,
        _ => MINUTES_PER_WEEK,
    }
}

fn half_unit(unit: &str, phrase: &str) -> DomainResult<u32> {
    let minutes = en_unit_minutes(unit);
    if minutes < 2 {
        return Err(DomainError::InvalidSchedule(format!(
            "interval '{}' is shorter than a minute",
            phrase.trim()
        )));
    }
    u32::try_from(minutes / 2).map_err(|_| out_of_range(phrase))
}

fn out_of_range(phrase: &str) -> DomainError {
    DomainError::InvalidSchedule(format!("interval '{}' is out of range", phrase.trim()))
}

fn malformed_time(phrase: &str) -> DomainError {
    DomainError::InvalidSchedule(format!("could not understand time '{}'", phrase.trim()))
}
