//! Intent classifier adapters.

pub mod rule_based;
pub mod scripted;

pub use rule_based::RuleBasedClassifier;
pub use scripted::{ScriptedClassifier, ScriptedResponse};
