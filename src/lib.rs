//! Taskwright - conversational task planner
//!
//! Taskwright turns a user utterance into zero or more executable tasks
//! routed to a single agent. Recurring requests go through a confirmation
//! flow: the schedule is asked for when missing, proposed back to the user,
//! and only committed as a recurring task after an explicit confirmation.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the collaborator ports
//! - **Service Layer** (`services`): the deterministic planning core
//! - **Application Layer** (`application`): per-session turn dispatch
//! - **Adapters** (`adapters`): stores, agent directory, scorer, classifiers
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskwright::adapters::classifier::RuleBasedClassifier;
//! use taskwright::adapters::directory::StaticAgentDirectory;
//! use taskwright::adapters::memory::InMemoryConversationStore;
//! use taskwright::adapters::scoring::KeywordAgentScorer;
//! use taskwright::{AgentSelector, ExecutionPlanner, PlannerConfig, TurnDispatcher, TurnRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PlannerConfig::default();
//!     let selector = AgentSelector::new(
//!         Arc::new(StaticAgentDirectory::default()),
//!         Arc::new(KeywordAgentScorer::new()),
//!         config.default_agent.clone(),
//!         config.confidence_threshold,
//!     );
//!     let planner = ExecutionPlanner::new(Arc::new(RuleBasedClassifier::new()), selector, &config);
//!     let dispatcher = TurnDispatcher::new(Arc::new(planner), Arc::new(InMemoryConversationStore::new()));
//!
//!     let outcome = dispatcher
//!         .dispatch("session-1", &TurnRequest::new("Monitor Apple's quarterly earnings"))
//!         .await?;
//!     println!("{}", outcome.result.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::TurnDispatcher;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AgentCard, AgentSelection, Config, ConfirmationPhase, ConversationState, PauseReason,
    PlannerConfig, PlanningResult, ScheduleConfig, ScheduleHint, Task, TaskPattern, TurnRequest,
    UnderstandingHints,
};
pub use domain::ports::{AgentDirectory, AgentScorer, ConversationStore, IntentClassifier};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AgentSelector, ExecutionPlanner, TurnOutcome};
