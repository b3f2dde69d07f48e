//! In-memory adapters.

pub mod conversation_store;

pub use conversation_store::InMemoryConversationStore;
