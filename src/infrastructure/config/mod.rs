//! Configuration loading for the planner
//!
//! Layered with figment:
//! - serialized defaults
//! - project YAML files under `.taskwright/`
//! - `TASKWRIGHT_*` environment overrides
//! - validation of planner, agent, store and logging settings

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
