//! Scripted classifier for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ContextMessage, UnderstandingHints};
use crate::domain::ports::IntentClassifier;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return these hints
    Hints(UnderstandingHints),
    /// Fail with this message
    Fail(String),
    /// Never answer; exercises the caller's timeout
    Hang,
}

/// Classifier that replays a queue of responses in order.
///
/// Once the queue is exhausted every call returns the fallback response
/// (plain hints unless configured otherwise).
pub struct ScriptedClassifier {
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    fallback: ScriptedResponse,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClassifier {
    pub fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            fallback: ScriptedResponse::Hints(UnderstandingHints::plain()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Classifier that always answers with `hints`.
    pub fn always(hints: UnderstandingHints) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: ScriptedResponse::Hints(hints),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue another response.
    pub async fn push(&self, response: ScriptedResponse) {
        self.responses.lock().await.push_back(response);
    }

    /// Queries received so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, query: &str, _context: &[ContextMessage]) -> DomainResult<UnderstandingHints> {
        self.calls.lock().await.push(query.to_string());
        let response = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match response {
            ScriptedResponse::Hints(hints) => Ok(hints),
            ScriptedResponse::Fail(message) => Err(DomainError::ClassifierFailed(message)),
            ScriptedResponse::Hang => {
                std::future::pending::<()>().await;
                Err(DomainError::ClassifierFailed("unreachable".to_string()))
            }
        }
    }
}
