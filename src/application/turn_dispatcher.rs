use crate::domain::models::{ConversationState, TurnRequest, UnderstandingHints};
use crate::domain::ports::ConversationStore;
use crate::services::{ExecutionPlanner, TurnOutcome};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Serializes turns per session and persists conversation state.
///
/// A session never has two turns in flight: each turn holds the session's
/// lock from load to save. State is written only when the planner reports
/// a committed turn, so a failed or timed-out turn leaves the stored state
/// exactly as it was.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taskwright::application::TurnDispatcher;
/// use taskwright::domain::models::TurnRequest;
/// use taskwright::domain::ports::ConversationStore;
/// use taskwright::services::ExecutionPlanner;
///
/// async fn example(planner: ExecutionPlanner, store: Arc<dyn ConversationStore>) -> anyhow::Result<()> {
///     let dispatcher = TurnDispatcher::new(Arc::new(planner), store);
///     let outcome = dispatcher
///         .dispatch("session-1", &TurnRequest::new("Monitor Apple's quarterly earnings"))
///         .await?;
///     println!("{}", outcome.result.to_json()?);
///     Ok(())
/// }
/// ```
pub struct TurnDispatcher {
    planner: Arc<ExecutionPlanner>,
    store: Arc<dyn ConversationStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TurnDispatcher {
    pub fn new(planner: Arc<ExecutionPlanner>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            planner,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run one turn for `session_id`, classifying the query.
    #[instrument(skip(self, request), fields(session = %session_id))]
    pub async fn dispatch(&self, session_id: &str, request: &TurnRequest) -> Result<TurnOutcome> {
        self.run(session_id, request, None).await
    }

    /// Run one turn with hints supplied by the caller instead of the classifier.
    #[instrument(skip(self, request, hints), fields(session = %session_id))]
    pub async fn dispatch_with_hints(
        &self,
        session_id: &str,
        request: &TurnRequest,
        hints: &UnderstandingHints,
    ) -> Result<TurnOutcome> {
        self.run(session_id, request, Some(hints)).await
    }

    /// Stored state of a session (fresh state for unknown sessions).
    pub async fn session_state(&self, session_id: &str) -> Result<ConversationState> {
        let lock = self.session_lock(session_id).await;
        let state = {
            let _guard = lock.lock().await;
            self.load(session_id).await
        };
        self.release_lock(session_id, lock).await;
        state
    }

    /// Drop any pending proposal for a session.
    pub async fn clear_session(&self, session_id: &str) -> Result<()> {
        let lock = self.session_lock(session_id).await;
        let cleared = {
            let _guard = lock.lock().await;
            self.store
                .clear(session_id)
                .await
                .with_context(|| format!("Failed to clear session {session_id}"))
        };
        self.release_lock(session_id, lock).await;
        cleared
    }

    async fn run(
        &self,
        session_id: &str,
        request: &TurnRequest,
        hints: Option<&UnderstandingHints>,
    ) -> Result<TurnOutcome> {
        let lock = self.session_lock(session_id).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.run_locked(session_id, request, hints).await
        };
        self.release_lock(session_id, lock).await;
        outcome
    }

    async fn run_locked(
        &self,
        session_id: &str,
        request: &TurnRequest,
        hints: Option<&UnderstandingHints>,
    ) -> Result<TurnOutcome> {
        let state = self.load(session_id).await?;

        let outcome = match hints {
            Some(hints) => self.planner.plan_with_hints(&state, request, hints).await,
            None => self.planner.plan(&state, request).await,
        };

        if let Some(next_state) = &outcome.next_state {
            self.store
                .save(session_id, next_state)
                .await
                .with_context(|| format!("Failed to save state for session {session_id}"))?;
            debug!(phase = %next_state.phase(), "session state committed");
        } else {
            debug!("turn not committed, session state unchanged");
        }
        Ok(outcome)
    }

    async fn load(&self, session_id: &str) -> Result<ConversationState> {
        Ok(self
            .store
            .load(session_id)
            .await
            .with_context(|| format!("Failed to load state for session {session_id}"))?
            .unwrap_or_default())
    }

    async fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(session_id.to_string()).or_default())
    }

    /// Forget the lock once no other turn holds or waits on it.
    async fn release_lock(&self, session_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(session_id);
        }
    }
}
