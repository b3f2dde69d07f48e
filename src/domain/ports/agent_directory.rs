//! Agent directory port (`tool_get_enabled_agents`).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentCard;

/// Lists the agents currently enabled for routing.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Return every enabled agent with its description and skills.
    async fn list_enabled_agents(&self) -> DomainResult<Vec<AgentCard>>;
}
