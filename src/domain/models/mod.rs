//! Domain models for the planner.

pub mod agent;
pub mod config;
pub mod conversation;
pub mod hints;
pub mod planning_result;
pub mod schedule;
pub mod task;
pub mod turn;

pub use agent::{AgentCard, AgentSelection, SelectionSource};
pub use config::{Config, LoggingConfig, PlannerConfig, StoreConfig};
pub use conversation::{ConfirmationPhase, ConversationState, PendingProposal};
pub use hints::{ScheduleHint, UnderstandingHints, UnusableHint};
pub use planning_result::{PauseReason, PlanningResult};
pub use schedule::{ScheduleConfig, ScheduleConfigWire};
pub use task::{Task, TaskPattern};
pub use turn::{ContextMessage, MessageRole, TurnRequest};
