//! Domain layer for the Taskwright planner
//!
//! This module contains the planning models, error taxonomy and the port
//! traits of every external collaborator.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
