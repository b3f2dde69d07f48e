//! Adapters for the planner's collaborators.

pub mod classifier;
pub mod directory;
pub mod file;
pub mod memory;
pub mod scoring;
