//! One planning turn, end to end.
//!
//! The planner asks the classifier for hints (bounded by a timeout), runs
//! the confirmation state machine, routes resolved turns to an agent and
//! assembles the result. It never persists anything: the returned
//! [`TurnOutcome`] says whether the caller should commit the new state.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AgentSelection, ConfirmationPhase, ConversationState, PauseReason, PlannerConfig, PlanningResult,
    TurnRequest, UnderstandingHints,
};
use crate::domain::ports::IntentClassifier;

use super::agent_selector::AgentSelector;
use super::confirmation::{ConfirmationMachine, Decision};
use super::guidance::{Guidance, Locale};
use super::result_assembler::ResultAssembler;
use super::task_builder::TaskBuilder;

/// Result of a turn plus what to do with the conversation state.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub result: PlanningResult,
    /// State to persist; `None` leaves the stored state untouched.
    pub next_state: Option<ConversationState>,
    pub phase: ConfirmationPhase,
    pub selection: Option<AgentSelection>,
}

impl TurnOutcome {
    pub const fn commits(&self) -> bool {
        self.next_state.is_some()
    }
}

pub struct ExecutionPlanner {
    classifier: Arc<dyn IntentClassifier>,
    selector: AgentSelector,
    machine: ConfirmationMachine,
    builder: TaskBuilder,
    assembler: ResultAssembler,
    classify_timeout: Duration,
    default_locale: String,
}

impl ExecutionPlanner {
    pub fn new(classifier: Arc<dyn IntentClassifier>, selector: AgentSelector, config: &PlannerConfig) -> Self {
        Self {
            classifier,
            selector,
            machine: ConfirmationMachine::new(config),
            builder: TaskBuilder::new(),
            assembler: ResultAssembler::new(),
            classify_timeout: Duration::from_millis(config.classify_timeout_ms),
            default_locale: config.default_locale.clone(),
        }
    }

    /// Plan one turn against the stored state.
    ///
    /// Collaborator failures and internal defects produce a retry result
    /// that leaves the stored state as it was.
    #[instrument(skip(self, state, request), fields(phase = %state.phase(), query_len = request.query.len()))]
    pub async fn plan(&self, state: &ConversationState, request: &TurnRequest) -> TurnOutcome {
        let hints = match self.classify(request).await {
            Ok(hints) => hints,
            Err(e) => {
                warn!(error = %e, "classifier unavailable, asking user to retry");
                return self.retry(state, request);
            }
        };
        self.plan_with_hints(state, request, &hints).await
    }

    /// Plan one turn with hints supplied by the caller.
    pub async fn plan_with_hints(
        &self,
        state: &ConversationState,
        request: &TurnRequest,
        hints: &UnderstandingHints,
    ) -> TurnOutcome {
        match self.resolve(state, request, hints).await {
            Ok(outcome) => {
                info!(
                    adequate = outcome.result.adequate,
                    tasks = outcome.result.tasks.len(),
                    phase = %outcome.phase,
                    "turn planned"
                );
                outcome
            }
            Err(e) => {
                if e.is_defect() {
                    error!(error = %e, "planning invariant violated");
                } else {
                    error!(error = %e, "turn failed");
                }
                self.retry(state, request)
            }
        }
    }

    async fn classify(&self, request: &TurnRequest) -> DomainResult<UnderstandingHints> {
        if request.query.trim().is_empty() {
            return Ok(UnderstandingHints::plain());
        }
        let call = self.classifier.classify(&request.query, &request.context);
        match tokio::time::timeout(self.classify_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::ClassifierTimeout(
                u64::try_from(self.classify_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    async fn resolve(
        &self,
        state: &ConversationState,
        request: &TurnRequest,
        hints: &UnderstandingHints,
    ) -> DomainResult<TurnOutcome> {
        let transition = self.machine.decide(state, &request.query, hints)?;
        let phase = transition.phase();
        debug!(from = %state.phase(), to = %phase, "confirmation transition");

        let selection = match transition.decision.routing_query() {
            Some(query) => Some(self.selector.select(request.target_agent(), query).await),
            None => None,
        };

        let result = match (transition.decision, &selection) {
            (Decision::Once { query, subject }, Some(agent)) => {
                let task = self.builder.build_once(&query, &agent.agent_name, subject.as_deref())?;
                self.assembler.adequate(vec![task], "Single-execution request routed to one agent")?
            }
            (
                Decision::Recurring {
                    query, title, schedule, ..
                },
                Some(agent),
            ) => {
                let task = self
                    .builder
                    .build_recurring(&query, &agent.agent_name, schedule, Some(&title))?;
                self.assembler.adequate(
                    vec![task],
                    format!("Recurring task confirmed: {}", schedule.describe()),
                )?
            }
            (Decision::Pause { pause, reason, guidance }, _) => self.assembler.paused(pause, reason, guidance)?,
            (_, None) => {
                return Err(DomainError::InvariantViolation(
                    "resolved decision without an agent".to_string(),
                ))
            }
        };

        Ok(TurnOutcome {
            result,
            next_state: Some(transition.next_state),
            phase,
            selection,
        })
    }

    fn retry(&self, state: &ConversationState, request: &TurnRequest) -> TurnOutcome {
        let fallback = state.locale.as_deref().unwrap_or(&self.default_locale);
        let locale = Locale::detect(None, &request.query, fallback);
        TurnOutcome {
            result: retry_result(Guidance::new(locale)),
            next_state: None,
            phase: state.phase(),
            selection: None,
        }
    }
}

/// Generic retry response. Valid by construction: no tasks and a non-empty
/// guidance message.
fn retry_result(guidance: Guidance) -> PlanningResult {
    PlanningResult {
        tasks: Vec::new(),
        adequate: false,
        reason: PauseReason::RetryLater.as_str().to_string(),
        guidance_message: Some(guidance.retry()),
    }
}
