//! Agent storage.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::domain::agents::{
    errors::AgentsServiceError,
    records::{AgentRecord, AgentUuid},
};

/// Keyed agent storage.
#[async_trait]
pub trait AgentStore: Send + Sync {
    async fn list(&self) -> Vec<AgentRecord>;

    async fn get(&self, agent: AgentUuid) -> Option<AgentRecord>;

    /// Insert a new agent. Fails with `AlreadyExists` when another agent
    /// holds the same code.
    async fn insert(&self, agent: AgentRecord) -> Result<AgentRecord, AgentsServiceError>;

    /// Overwrite an existing agent; `None` when it is no longer stored.
    async fn replace(&self, agent: AgentRecord) -> Option<AgentRecord>;

    async fn remove(&self, agent: AgentUuid) -> Option<AgentRecord>;
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryAgentStore {
    agents: RwLock<FxHashMap<AgentUuid, AgentRecord>>,
}

impl InMemoryAgentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn list(&self) -> Vec<AgentRecord> {
        self.agents.read().await.values().cloned().collect()
    }

    async fn get(&self, agent: AgentUuid) -> Option<AgentRecord> {
        self.agents.read().await.get(&agent).cloned()
    }

    async fn insert(&self, agent: AgentRecord) -> Result<AgentRecord, AgentsServiceError> {
        let mut agents = self.agents.write().await;

        if agents
            .values()
            .any(|existing| existing.agent_code == agent.agent_code)
        {
            return Err(AgentsServiceError::AlreadyExists(agent.agent_code));
        }

        agents.insert(agent.uuid, agent.clone());

        Ok(agent)
    }

    async fn replace(&self, agent: AgentRecord) -> Option<AgentRecord> {
        let mut agents = self.agents.write().await;

        let slot = agents.get_mut(&agent.uuid)?;
        *slot = agent.clone();

        Some(agent)
    }

    async fn remove(&self, agent: AgentUuid) -> Option<AgentRecord> {
        self.agents.write().await.remove(&agent)
    }
}
