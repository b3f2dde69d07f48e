//! Recurring schedule domain model.
//!
//! A `ScheduleConfig` is either a fixed minute interval or a daily clock
//! time, never both. The wire form keeps both keys (one of them `null`), so
//! serde goes through [`ScheduleConfigWire`] and rejects anything that is
//! not exactly one of the two.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::DomainError;

/// Format used for daily clock times on the wire.
pub const DAILY_TIME_FORMAT: &str = "%H:%M";

/// Normalized recurrence descriptor for a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleConfigWire", into = "ScheduleConfigWire")]
pub enum ScheduleConfig {
    /// Run every `n` minutes.
    Interval(u32),
    /// Run once a day at the given local clock time.
    DailyTime(NaiveTime),
}

impl ScheduleConfig {
    /// Build an interval schedule, rejecting zero.
    pub fn interval(minutes: u32) -> Result<Self, DomainError> {
        if minutes == 0 {
            return Err(DomainError::InvalidSchedule(
                "interval must be a positive number of minutes".to_string(),
            ));
        }
        Ok(Self::Interval(minutes))
    }

    /// Build a daily schedule from an `HH:MM` string.
    pub fn daily_at(time: &str) -> Result<Self, DomainError> {
        NaiveTime::parse_from_str(time.trim(), DAILY_TIME_FORMAT)
            .map(Self::DailyTime)
            .map_err(|_| DomainError::InvalidSchedule(format!("malformed daily time '{time}'")))
    }

    pub const fn interval_minutes(&self) -> Option<u32> {
        match self {
            Self::Interval(minutes) => Some(*minutes),
            Self::DailyTime(_) => None,
        }
    }

    /// Daily time rendered as 24-hour `HH:MM`.
    pub fn daily_time(&self) -> Option<String> {
        match self {
            Self::Interval(_) => None,
            Self::DailyTime(time) => Some(time.format(DAILY_TIME_FORMAT).to_string()),
        }
    }

    /// Human-readable description of the schedule in English.
    pub fn describe(&self) -> String {
        match self {
            Self::Interval(1) => "every 1 minute".to_string(),
            Self::Interval(minutes) => format!("every {minutes} minutes"),
            Self::DailyTime(time) => format!("daily at {}", time.format(DAILY_TIME_FORMAT)),
        }
    }

    /// Human-readable description of the schedule in Chinese.
    pub fn describe_zh(&self) -> String {
        match self {
            Self::Interval(minutes) => format!("每 {minutes} 分钟"),
            Self::DailyTime(time) => format!("每天 {}", time.format(DAILY_TIME_FORMAT)),
        }
    }

    /// Re-check the exclusivity rule. Only a zero interval can fail here,
    /// since the enum already rules out "both" and "neither".
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Interval(0) => Err(DomainError::InvalidSchedule(
                "interval must be a positive number of minutes".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ScheduleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Wire representation: `{"interval_minutes": int|null, "daily_time": "HH:MM"|null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfigWire {
    #[serde(default)]
    pub interval_minutes: Option<i64>,
    #[serde(default)]
    pub daily_time: Option<String>,
}

impl TryFrom<ScheduleConfigWire> for ScheduleConfig {
    type Error = DomainError;

    fn try_from(wire: ScheduleConfigWire) -> Result<Self, Self::Error> {
        match (wire.interval_minutes, wire.daily_time) {
            (Some(_), Some(_)) => Err(DomainError::InvalidSchedule(
                "only one of interval_minutes or daily_time may be set".to_string(),
            )),
            (None, None) => Err(DomainError::MissingSchedule),
            (Some(minutes), None) => {
                let minutes = u32::try_from(minutes).map_err(|_| {
                    DomainError::InvalidSchedule(format!("interval {minutes} is out of range"))
                })?;
                Self::interval(minutes)
            }
            (None, Some(time)) => Self::daily_at(&time),
        }
    }
}

impl From<ScheduleConfig> for ScheduleConfigWire {
    fn from(config: ScheduleConfig) -> Self {
        Self {
            interval_minutes: config.interval_minutes().map(i64::from),
            daily_time: config.daily_time(),
        }
    }
}
