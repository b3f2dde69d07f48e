//! Agent directory backed by the configured agent list.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentCard;
use crate::domain::ports::AgentDirectory;

#[derive(Debug, Clone, Default)]
pub struct StaticAgentDirectory {
    agents: Vec<AgentCard>,
}

impl StaticAgentDirectory {
    pub fn new(agents: Vec<AgentCard>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &[AgentCard] {
        &self.agents
    }
}

#[async_trait]
impl AgentDirectory for StaticAgentDirectory {
    async fn list_enabled_agents(&self) -> DomainResult<Vec<AgentCard>> {
        Ok(self.agents.clone())
    }
}
