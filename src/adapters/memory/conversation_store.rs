//! In-memory conversation store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::ConversationState;
use crate::domain::ports::ConversationStore;

/// Process-local store; state is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    sessions: Arc<RwLock<HashMap<String, ConversationState>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with stored state.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, session_id: &str) -> DomainResult<Option<ConversationState>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, state: &ConversationState) -> DomainResult<()> {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), state.clone());
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> DomainResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
