//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::agents::AgentsArgs;
use super::commands::plan::PlanArgs;
use super::commands::schedule::ScheduleArgs;
use super::commands::session::SessionArgs;

#[derive(Parser, Debug)]
#[command(name = "taskwright")]
#[command(about = "Taskwright - conversational task planner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to load instead of the project files
    #[arg(short, long, global = true, env = "TASKWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan one conversational turn and print the planning result
    Plan(PlanArgs),

    /// Inspect or reset stored conversation state
    Session(SessionArgs),

    /// List configured agents, optionally ranked against a query
    Agents(AgentsArgs),

    /// Validate schedule phrases
    Schedule(ScheduleArgs),
}
