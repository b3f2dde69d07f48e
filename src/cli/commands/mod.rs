//! CLI command implementations.

pub mod agents;
pub mod plan;
pub mod schedule;
pub mod session;

use std::sync::Arc;

use crate::adapters::classifier::RuleBasedClassifier;
use crate::adapters::directory::StaticAgentDirectory;
use crate::adapters::file::FileConversationStore;
use crate::adapters::scoring::KeywordAgentScorer;
use crate::application::TurnDispatcher;
use crate::domain::models::Config;
use crate::services::{AgentSelector, ExecutionPlanner};

/// Agent selector over the agents listed in the configuration.
pub(crate) fn agent_selector(config: &Config) -> AgentSelector {
    AgentSelector::new(
        Arc::new(StaticAgentDirectory::new(config.agents.clone())),
        Arc::new(KeywordAgentScorer::new()),
        config.planner.default_agent.clone(),
        config.planner.confidence_threshold,
    )
}

/// Dispatcher wired with the offline classifier and the file store.
pub(crate) fn file_backed_dispatcher(config: &Config) -> TurnDispatcher {
    let planner = ExecutionPlanner::new(
        Arc::new(RuleBasedClassifier::new()),
        agent_selector(config),
        &config.planner,
    );
    TurnDispatcher::new(
        Arc::new(planner),
        Arc::new(FileConversationStore::new(&config.store.state_dir)),
    )
}
