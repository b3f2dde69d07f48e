use serde::{Deserialize, Serialize};

use super::agent::AgentCard;

/// Main configuration structure for Taskwright
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Planner policy
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Enabled agents served by the static agent directory
    #[serde(default)]
    pub agents: Vec<AgentCard>,

    /// Conversation state storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Planner policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Agent used when no directory candidate is confident enough
    #[serde(default = "default_agent")]
    pub default_agent: String,

    /// Minimum score (0-1] for a directory candidate to be chosen
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Time budget for the classifier call, in milliseconds
    #[serde(default = "default_classify_timeout_ms")]
    pub classify_timeout_ms: u64,

    /// Confirmation words accepted in addition to the built-in vocabulary
    #[serde(default)]
    pub extra_confirmation_tokens: Vec<String>,

    /// Decline words accepted in addition to the built-in vocabulary
    #[serde(default)]
    pub extra_decline_tokens: Vec<String>,

    /// Locale used for guidance when the utterance gives no signal
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_agent() -> String {
    "ResearchAgent".to_string()
}

const fn default_confidence_threshold() -> f64 {
    0.7
}

const fn default_classify_timeout_ms() -> u64 {
    30_000
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_agent: default_agent(),
            confidence_threshold: default_confidence_threshold(),
            classify_timeout_ms: default_classify_timeout_ms(),
            extra_confirmation_tokens: vec![],
            extra_decline_tokens: vec![],
            default_locale: default_locale(),
        }
    }
}

/// Conversation state storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Directory holding one JSON state file per session
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

fn default_state_dir() -> String {
    ".taskwright/sessions".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
