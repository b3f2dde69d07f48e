use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid confidence_threshold: {0}. Must be in (0, 1]")]
    InvalidConfidenceThreshold(f64),

    #[error("Default agent cannot be empty")]
    EmptyDefaultAgent,

    #[error("Invalid classify_timeout_ms: {0}. Must be positive")]
    InvalidClassifyTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Store state_dir cannot be empty")]
    EmptyStateDir,

    #[error("Invalid default_locale: {0}. Must be one of: en, zh")]
    InvalidLocale(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .taskwright/config.yaml (project config)
    /// 3. .taskwright/local.yaml (project local overrides, optional)
    /// 4. Environment variables (TASKWRIGHT_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".taskwright/config.yaml"))
            .merge(Yaml::file(".taskwright/local.yaml"))
            .merge(Env::prefixed("TASKWRIGHT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, with environment overrides
    /// on top
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TASKWRIGHT_").split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load from an explicit file if given, otherwise fall back to
    /// [`ConfigLoader::load`].
    pub fn load_with_override(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let planner = &config.planner;

        let threshold = planner.confidence_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidConfidenceThreshold(threshold));
        }

        if planner.default_agent.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultAgent);
        }

        if planner.classify_timeout_ms == 0 {
            return Err(ConfigError::InvalidClassifyTimeout(planner.classify_timeout_ms));
        }

        if !["en", "zh"].contains(&planner.default_locale.as_str()) {
            return Err(ConfigError::InvalidLocale(planner.default_locale.clone()));
        }

        for token in planner
            .extra_confirmation_tokens
            .iter()
            .chain(&planner.extra_decline_tokens)
        {
            if token.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "confirmation and decline tokens cannot be empty".to_string(),
                ));
            }
        }

        // Validate agents
        let mut seen = HashSet::new();
        for agent in &config.agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "agent name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::ValidationFailed(format!(
                    "duplicate agent name '{}'",
                    agent.name
                )));
            }
        }

        if config.store.state_dir.trim().is_empty() {
            return Err(ConfigError::EmptyStateDir);
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
