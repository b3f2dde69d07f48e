//! Schedule command: validate schedule phrases without planning a turn.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{ScheduleConfig, ScheduleHint};
use crate::services::schedule_validator;

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommands,
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// Normalize schedule phrases into a schedule config
    Check {
        /// Interval phrase, e.g. "every 30 minutes"
        #[arg(short, long)]
        interval: Option<String>,
        /// Clock-time phrase, e.g. "9 AM"
        #[arg(short, long)]
        time: Option<String>,
        /// Free text scanned when no phrase is given
        #[arg(short, long)]
        raw: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct ScheduleCheckOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_config: Option<ScheduleConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScheduleCheckOutput {
    fn from_hint(hint: &ScheduleHint) -> Self {
        match schedule_validator::validate(hint) {
            Ok(config) => Self {
                valid: true,
                description: Some(config.describe()),
                schedule_config: Some(config),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                schedule_config: None,
                description: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl CommandOutput for ScheduleCheckOutput {
    fn to_human(&self) -> String {
        match (&self.description, &self.error) {
            (Some(description), _) => format!("Valid schedule: {description}"),
            (None, Some(error)) => format!("Invalid schedule: {error}"),
            (None, None) => "Invalid schedule".to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ScheduleArgs, json_mode: bool) -> Result<()> {
    match args.command {
        ScheduleCommands::Check { interval, time, raw } => {
            let hint = ScheduleHint {
                interval_phrase: interval,
                clock_phrase: time,
                raw_text: raw,
            };
            let out = ScheduleCheckOutput::from_hint(&hint);
            output(&out, json_mode);
        }
    }
    Ok(())
}
