//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces of every collaborator the planner
//! talks to:
//! - IntentClassifier: the external language-understanding call
//! - AgentDirectory: enabled agents with descriptions and skills
//! - AgentScorer: relevance scoring used for agent selection
//! - ConversationStore: per-session state persistence

pub mod agent_directory;
pub mod agent_scorer;
pub mod conversation_store;
pub mod intent_classifier;

pub use agent_directory::AgentDirectory;
pub use agent_scorer::AgentScorer;
pub use conversation_store::ConversationStore;
pub use intent_classifier::IntentClassifier;
