//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - console output on stderr (stdout carries the planning result)
//! - JSON or pretty formatting
//! - optional rolling log files via tracing-appender

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
