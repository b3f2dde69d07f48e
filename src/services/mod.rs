pub mod agent_selector;
pub mod confirmation;
pub mod guidance;
pub mod planner;
pub mod query_transformer;
pub mod result_assembler;
pub mod schedule_validator;
pub mod script;
pub mod task_builder;

pub use agent_selector::AgentSelector;
pub use confirmation::{ConfirmationMachine, Decision, Transition, Vocabulary};
pub use guidance::{Guidance, Locale};
pub use planner::{ExecutionPlanner, TurnOutcome};
pub use result_assembler::ResultAssembler;
pub use task_builder::TaskBuilder;
