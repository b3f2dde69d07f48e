//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;

use taskwright::adapters::classifier::{ScriptedClassifier, ScriptedResponse};
use taskwright::adapters::directory::StaticAgentDirectory;
use taskwright::adapters::memory::InMemoryConversationStore;
use taskwright::adapters::scoring::KeywordAgentScorer;
use taskwright::domain::models::{AgentCard, PlannerConfig};
use taskwright::domain::ports::{ConversationStore, IntentClassifier};
use taskwright::services::{AgentSelector, ExecutionPlanner};
use taskwright::TurnDispatcher;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Agents used across the flow tests.
pub fn sample_agents() -> Vec<AgentCard> {
    vec![
        AgentCard::new("StockAgent", "Tracks stock prices, price alerts and market moves")
            .with_skills(["stock", "price", "market"]),
        AgentCard::new("WeatherAgent", "Weather forecasts and severe weather warnings")
            .with_skills(["weather", "forecast", "rain"]),
    ]
}

/// Planner over `classifier` and the sample agents.
pub fn planner_with(classifier: Arc<dyn IntentClassifier>, config: &PlannerConfig) -> ExecutionPlanner {
    let selector = AgentSelector::new(
        Arc::new(StaticAgentDirectory::new(sample_agents())),
        Arc::new(KeywordAgentScorer::new()),
        config.default_agent.clone(),
        config.confidence_threshold,
    );
    ExecutionPlanner::new(classifier, selector, config)
}

/// Dispatcher over an in-memory store and a scripted classifier.
pub fn scripted_dispatcher(responses: Vec<ScriptedResponse>) -> (TurnDispatcher, Arc<InMemoryConversationStore>) {
    scripted_dispatcher_with(responses, &PlannerConfig::default())
}

pub fn scripted_dispatcher_with(
    responses: Vec<ScriptedResponse>,
    config: &PlannerConfig,
) -> (TurnDispatcher, Arc<InMemoryConversationStore>) {
    let store = Arc::new(InMemoryConversationStore::new());
    let planner = planner_with(Arc::new(ScriptedClassifier::new(responses)), config);
    let dispatcher = TurnDispatcher::new(
        Arc::new(planner),
        Arc::clone(&store) as Arc<dyn ConversationStore>,
    );
    (dispatcher, store)
}

/// Parse the strict result JSON back into a value.
pub fn result_json(result: &taskwright::PlanningResult) -> serde_json::Value {
    serde_json::from_str(&result.to_json().expect("result serializes")).expect("result is strict JSON")
}
