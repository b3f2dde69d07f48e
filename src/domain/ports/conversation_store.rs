/// Conversation store port (trait) for dependency injection.
///
/// Persists the `ConversationState` projection of each session between
/// turns. Serializing turns per session is the dispatcher's job, not the
/// store's.
use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ConversationState;

/// Repository trait for conversation state persistence
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the state of a session
    ///
    /// # Returns
    /// - `Some(state)` if the session has stored state
    /// - `None` for an unknown session
    async fn load(&self, session_id: &str) -> DomainResult<Option<ConversationState>>;

    /// Replaces the state of a session
    async fn save(&self, session_id: &str, state: &ConversationState) -> DomainResult<()>;

    /// Removes any stored state for a session
    async fn clear(&self, session_id: &str) -> DomainResult<()>;
}
