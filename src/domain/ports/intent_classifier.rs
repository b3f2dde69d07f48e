//! Language-understanding port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ContextMessage, UnderstandingHints};

/// External reasoning call that turns an utterance into structured hints.
///
/// Implementations may be slow or fail; the planner bounds every call with
/// a timeout and treats failure as a retryable turn.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify `query` given the recent conversation.
    async fn classify(
        &self,
        query: &str,
        context: &[ContextMessage],
    ) -> DomainResult<UnderstandingHints>;
}
