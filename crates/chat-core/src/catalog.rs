//! Static table of available agents.

use chat_types::{ChatError, Result, agent::AgentDescriptor, config::default_agents};

#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<AgentDescriptor>,
}

impl AgentCatalog {
    pub fn new(agents: Vec<AgentDescriptor>) -> Self {
        Self { agents }
    }

    pub fn all(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn get(&self, agent_id: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Look up an agent; a miss must send the user back to agent selection.
    pub fn resolve(&self, agent_id: &str) -> Result<&AgentDescriptor> {
        self.get(agent_id)
            .ok_or_else(|| ChatError::UnknownAgent(agent_id.to_string()))
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.get(agent_id).is_some()
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self::new(default_agents())
    }
}
