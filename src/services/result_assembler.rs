//! Single exit point for planning results.
//!
//! Every result leaving the planner passes through [`ResultAssembler`], which
//! re-checks the cross-field rules. A violation is a defect in the planner,
//! reported as [`DomainError::InvariantViolation`] and never serialized.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{PauseReason, PlanningResult, Task, TaskPattern};

use super::task_builder::title_within_bounds;

#[derive(Debug, Default, Clone, Copy)]
pub struct ResultAssembler;

impl ResultAssembler {
    pub const fn new() -> Self {
        Self
    }

    /// Result carrying tasks to execute.
    pub fn adequate(&self, tasks: Vec<Task>, reason: impl Into<String>) -> DomainResult<PlanningResult> {
        self.finish(PlanningResult {
            tasks,
            adequate: true,
            reason: reason.into(),
            guidance_message: None,
        })
    }

    /// Result that pauses the turn and asks the user something.
    pub fn paused(
        &self,
        pause: PauseReason,
        reason: impl Into<String>,
        guidance: impl Into<String>,
    ) -> DomainResult<PlanningResult> {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            pause.as_str().to_string()
        } else {
            reason
        };
        self.finish(PlanningResult {
            tasks: Vec::new(),
            adequate: false,
            reason,
            guidance_message: Some(guidance.into()),
        })
    }

    /// Validate a fully built result.
    pub fn finish(&self, result: PlanningResult) -> DomainResult<PlanningResult> {
        check(&result)?;
        Ok(result)
    }
}

/// Check every cross-field rule of a planning result.
pub fn check(result: &PlanningResult) -> DomainResult<()> {
    let guidance = result.guidance_message.as_deref().map(str::trim);

    if result.adequate {
        if result.tasks.is_empty() {
            return violation("adequate result without tasks");
        }
        if guidance.is_some_and(|g| !g.is_empty()) {
            return violation("adequate result carries a guidance message");
        }
    } else {
        if !result.tasks.is_empty() {
            return violation("inadequate result carries tasks");
        }
        if guidance.is_none_or(str::is_empty) {
            return violation("inadequate result without guidance message");
        }
    }

    for task in &result.tasks {
        check_task(task)?;
    }

    if let Some(first) = result.tasks.first() {
        if result.tasks.iter().any(|t| t.agent_name != first.agent_name) {
            return violation("tasks routed to more than one agent");
        }
    }
    Ok(())
}

fn check_task(task: &Task) -> DomainResult<()> {
    if task.query.trim().is_empty() {
        return violation(format!("task '{}' has an empty query", task.title));
    }
    if task.agent_name.trim().is_empty() {
        return violation(format!("task '{}' has no agent", task.title));
    }
    if task.title.trim().is_empty() || !title_within_bounds(&task.title) {
        return violation(format!("task title '{}' is out of bounds", task.title));
    }
    match (task.pattern, &task.schedule_config) {
        (TaskPattern::Recurring, Some(schedule)) => schedule
            .validate()
            .map_err(|e| DomainError::InvariantViolation(format!("recurring task '{}': {e}", task.title))),
        (TaskPattern::Recurring, None) => {
            violation(format!("recurring task '{}' has no schedule", task.title))
        }
        (TaskPattern::Once, Some(_)) => violation(format!("one-time task '{}' has a schedule", task.title)),
        (TaskPattern::Once, None) => Ok(()),
    }
}

fn violation<T>(message: impl Into<String>) -> DomainResult<T> {
    Err(DomainError::InvariantViolation(message.into()))
}
