//! Session CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, ConversationState};

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show the stored conversation state of a session
    Show {
        /// Session identifier
        session: String,
    },
    /// Discard any pending proposal of a session
    Clear {
        /// Session identifier
        session: String,
    },
}

#[derive(Debug, Serialize)]
pub struct SessionOutput {
    pub session: String,
    pub phase: String,
    pub state: ConversationState,
}

impl CommandOutput for SessionOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Session: {}", self.session),
            format!("Phase: {}", self.phase),
        ];
        if let Some(query) = &self.state.pending_original_query {
            lines.push(format!("Pending query: {query}"));
        }
        if let Some(title) = &self.state.pending_title {
            lines.push(format!("Pending title: {title}"));
        }
        if let Some(schedule) = &self.state.pending_schedule {
            lines.push(format!("Pending schedule: {schedule}"));
        }
        if let Some(guidance) = &self.state.pending_guidance {
            lines.push(format!("\nLast guidance:\n{guidance}"));
        }
        if let Some(updated) = &self.state.updated_at {
            lines.push(format!("\nUpdated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for SessionActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SessionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let dispatcher = super::file_backed_dispatcher(config);

    match args.command {
        SessionCommands::Show { session } => {
            let state = dispatcher.session_state(&session).await?;
            let out = SessionOutput {
                phase: state.phase().to_string(),
                session,
                state,
            };
            output(&out, json_mode);
        }
        SessionCommands::Clear { session } => {
            dispatcher.clear_session(&session).await?;
            let out = SessionActionOutput {
                success: true,
                message: format!("Session {session} cleared"),
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ScheduleConfig;

    #[test]
    fn test_human_output_lists_pending_fields() {
        let state = ConversationState {
            pending_original_query: Some("Monitor gold".to_string()),
            pending_title: Some("Monitor gold".to_string()),
            pending_schedule: Some(ScheduleConfig::Interval(60)),
            ..ConversationState::default()
        };
        let out = SessionOutput {
            session: "s1".to_string(),
            phase: state.phase().to_string(),
            state,
        };
        let human = out.to_human();
        assert!(human.contains("Phase: awaiting_final_confirmation"));
        assert!(human.contains("Pending schedule: every 60 minutes"));
    }
}
