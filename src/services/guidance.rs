//! User-facing guidance messages.

use std::fmt;
use std::str::FromStr;

use crate::domain::models::ScheduleConfig;

use super::script::contains_cjk;

/// Language used for guidance messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Pick the locale for a turn: classifier hint, then script detection
    /// on the query, then the configured default.
    pub fn detect(hint: Option<&str>, query: &str, default: &str) -> Self {
        if let Some(locale) = hint.and_then(|h| h.parse().ok()) {
            return locale;
        }
        if contains_cjk(query) {
            return Self::Zh;
        }
        default.parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let primary = lower.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" => Ok(Self::En),
            "zh" | "cn" => Ok(Self::Zh),
            other => Err(format!("Unsupported locale: {other}")),
        }
    }
}

/// Localized message catalog.
#[derive(Debug, Clone, Copy)]
pub struct Guidance {
    locale: Locale,
}

impl Guidance {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub fn describe_schedule(&self, schedule: &ScheduleConfig) -> String {
        match self.locale {
            Locale::En => schedule.describe(),
            Locale::Zh => schedule.describe_zh(),
        }
    }

    pub fn ask_schedule(&self, title: &str) -> String {
        match self.locale {
            Locale::En => format!(
                "To set up the {title} task as recurring monitoring, how often should it run? \
                 For example: every hour, every 30 minutes, or daily at 9 AM. \
                 If you only need a one-time analysis, just say so."
            ),
            Locale::Zh => format!(
                "要将「{title}」设置为定期任务，请告诉我执行频率，例如：每小时、每30分钟或每天上午9点。如果只需要一次性分析，也请告诉我。"
            ),
        }
    }

    pub fn confirm_schedule(&self, title: &str, schedule: &ScheduleConfig) -> String {
        let schedule = self.describe_schedule(schedule);
        match self.locale {
            Locale::En => format!(
                "To better set up the {title} task, please confirm the update frequency: {schedule}"
            ),
            Locale::Zh => format!("为了更好地设置「{title}」任务，请确认更新频率：{schedule}"),
        }
    }

    /// Re-prompt after a rejected schedule. The validator reason is English
    /// and only appears in the English message.
    pub fn invalid_schedule(&self, title: &str, reason: &str) -> String {
        match self.locale {
            Locale::En => format!(
                "I couldn't use that schedule for the {title} task ({reason}). \
                 Please give either one interval (e.g. every 2 hours) or one daily time (e.g. daily at 09:00)."
            ),
            Locale::Zh => format!(
                "无法使用该频率设置「{title}」任务。请只提供一个间隔（如每2小时）或一个每日时间（如每天 09:00）。"
            ),
        }
    }

    pub fn declined(&self, title: &str) -> String {
        match self.locale {
            Locale::En => format!("Okay, the {title} task will not be set up. Tell me if you need anything else."),
            Locale::Zh => format!("好的，不会设置「{title}」任务。如有其他需要请告诉我。"),
        }
    }

    pub fn unusable(&self) -> String {
        match self.locale {
            Locale::En => "This request can't be carried out. Please describe a different task.".to_string(),
            Locale::Zh => "无法执行该请求，请描述其他任务。".to_string(),
        }
    }

    pub fn empty_request(&self) -> String {
        match self.locale {
            Locale::En => "Please describe what you would like me to do.".to_string(),
            Locale::Zh => "请描述您希望执行的任务。".to_string(),
        }
    }

    pub fn retry(&self) -> String {
        match self.locale {
            Locale::En => "Something went wrong while planning this request. Please try again.".to_string(),
            Locale::Zh => "规划该请求时出现问题，请重试。".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_detection_order() {
        assert_eq!(Locale::detect(Some("zh-CN"), "hello", "en"), Locale::Zh);
        assert_eq!(Locale::detect(Some("en"), "每小时检查", "zh"), Locale::En);
        assert_eq!(Locale::detect(None, "每小时检查股价", "en"), Locale::Zh);
        assert_eq!(Locale::detect(None, "hello", "zh"), Locale::Zh);
        assert_eq!(Locale::detect(Some("fr"), "hello", "xx"), Locale::En);
    }

    #[test]
    fn test_confirmation_names_title_and_schedule() {
        let schedule = ScheduleConfig::daily_at("09:00").unwrap();
        let message = Guidance::new(Locale::En).confirm_schedule("Monitor Apple's quarterly earnings", &schedule);
        assert_eq!(
            message,
            "To better set up the Monitor Apple's quarterly earnings task, please confirm the update frequency: daily at 09:00"
        );

        let message = Guidance::new(Locale::Zh).confirm_schedule("特斯拉股价", &ScheduleConfig::Interval(60));
        assert!(message.contains("每 60 分钟"));
    }

    #[test]
    fn test_chinese_invalid_schedule_omits_english_reason() {
        let reason = "both an interval and a clock time were given";
        let zh = Guidance::new(Locale::Zh).invalid_schedule("特斯拉股价", reason);
        assert!(!zh.contains(reason));
        assert!(zh.contains("特斯拉股价"));
        assert!(Guidance::new(Locale::En).invalid_schedule("Tesla", reason).contains(reason));
    }

    #[test]
    fn test_every_message_is_non_empty() {
        for locale in [Locale::En, Locale::Zh] {
            let g = Guidance::new(locale);
            for message in [
                g.ask_schedule("t"),
                g.invalid_schedule("t", "r"),
                g.declined("t"),
                g.unusable(),
                g.empty_request(),
                g.retry(),
            ] {
                assert!(!message.trim().is_empty());
            }
        }
    }
}
