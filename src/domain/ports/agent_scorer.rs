//! Pluggable relevance scoring for agent selection.

use crate::domain::models::AgentCard;

/// Scores how well an agent fits a query.
///
/// Scores are confidences in `[0.0, 1.0]`. The selector only enforces the
/// threshold-and-fallback policy; how a score is computed is up to the
/// implementation.
pub trait AgentScorer: Send + Sync {
    fn score(&self, query: &str, agent: &AgentCard) -> f64;
}
