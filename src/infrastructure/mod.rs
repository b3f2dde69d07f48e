//! Infrastructure layer module
//!
//! Layered configuration (figment) and logging (tracing). Storage, directory
//! and classifier implementations of the domain ports live in `adapters`.

pub mod config;
pub mod logging;
