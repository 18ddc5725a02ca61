//! Agents service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::agents::{
    data::{AgentFilters, AgentUpdate, NewAgent, StatusChange},
    errors::{AgentsServiceError, StatusList},
    records::{AgentRecord, AgentStatus, AgentUuid},
    store::AgentStore,
    summary::{StatusSummary, summarize},
    transitions::StatusTransitions,
    validation::{parse_status, validate_new_agent, validate_reason, validate_update},
};

#[derive(Clone)]
pub struct StoreAgentsService {
    store: Arc<dyn AgentStore>,
    transitions: StatusTransitions,
}

impl StoreAgentsService {
    #[must_use]
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self::with_transitions(store, StatusTransitions::default())
    }

    #[must_use]
    pub fn with_transitions(store: Arc<dyn AgentStore>, transitions: StatusTransitions) -> Self {
        Self { store, transitions }
    }

    async fn require_agent(&self, agent: AgentUuid) -> Result<AgentRecord, AgentsServiceError> {
        self.store
            .get(agent)
            .await
            .ok_or(AgentsServiceError::NotFound)
    }
}

impl std::fmt::Debug for StoreAgentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAgentsService")
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AgentsService for StoreAgentsService {
    async fn list_agents(
        &self,
        filters: AgentFilters,
    ) -> Result<Vec<AgentRecord>, AgentsServiceError> {
        let mut agents: Vec<AgentRecord> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|agent| filters.status.is_none_or(|status| agent.status == status))
            .filter(|agent| {
                filters
                    .department
                    .is_none_or(|department| agent.department == department)
            })
            .collect();

        agents.sort_by_key(|agent| (agent.created_at, agent.uuid));

        Ok(agents)
    }

    async fn get_agent(&self, agent: AgentUuid) -> Result<AgentRecord, AgentsServiceError> {
        self.require_agent(agent).await
    }

    async fn create_agent(&self, agent: NewAgent) -> Result<AgentRecord, AgentsServiceError> {
        let valid = validate_new_agent(agent).map_err(AgentsServiceError::Invalid)?;
        let now = Timestamp::now();

        let created = self
            .store
            .insert(AgentRecord {
                uuid: AgentUuid::new(),
                agent_code: valid.agent_code,
                name: valid.name,
                email: valid.email,
                department: valid.department,
                skills: valid.skills,
                status: AgentStatus::Available,
                status_reason: None,
                status_changed_at: now,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            agent_uuid = %created.uuid,
            agent_code = %created.agent_code,
            "agent created"
        );

        Ok(created)
    }

    async fn update_agent(
        &self,
        agent: AgentUuid,
        update: AgentUpdate,
    ) -> Result<AgentRecord, AgentsServiceError> {
        let mut existing = self.require_agent(agent).await?;
        let valid = validate_update(update).map_err(AgentsServiceError::Invalid)?;

        if let Some(name) = valid.name {
            existing.name = name;
        }

        if let Some(email) = valid.email {
            existing.email = email;
        }

        if let Some(department) = valid.department {
            existing.department = department;
        }

        if let Some(skills) = valid.skills {
            existing.skills = skills;
        }

        existing.updated_at = Timestamp::now();

        self.store
            .replace(existing)
            .await
            .ok_or(AgentsServiceError::NotFound)
    }

    async fn update_status(
        &self,
        agent: AgentUuid,
        change: StatusChange,
    ) -> Result<AgentRecord, AgentsServiceError> {
        let mut existing = self.require_agent(agent).await?;

        let to = parse_status(&change.status)
            .ok_or_else(|| AgentsServiceError::InvalidStatus(change.status.clone()))?;

        let from = existing.status;

        if !self.transitions.permits(from, to) {
            return Err(AgentsServiceError::InvalidTransition {
                from,
                to,
                allowed: StatusList(self.transitions.allowed(from).to_vec()),
            });
        }

        validate_reason(change.reason.as_deref()).map_err(AgentsServiceError::Invalid)?;

        let now = Timestamp::now();

        existing.status = to;
        existing.status_reason = change.reason;
        existing.status_changed_at = now;
        existing.updated_at = now;

        let updated = self
            .store
            .replace(existing)
            .await
            .ok_or(AgentsServiceError::NotFound)?;

        info!(
            agent_uuid = %updated.uuid,
            agent_code = %updated.agent_code,
            %from,
            %to,
            "agent status changed"
        );

        Ok(updated)
    }

    async fn delete_agent(&self, agent: AgentUuid) -> Result<(), AgentsServiceError> {
        let removed = self
            .store
            .remove(agent)
            .await
            .ok_or(AgentsServiceError::NotFound)?;

        info!(agent_code = %removed.agent_code, "agent deleted");

        Ok(())
    }

    async fn status_summary(&self) -> Result<StatusSummary, AgentsServiceError> {
        let agents = self.store.list().await;

        Ok(summarize(&agents, Timestamp::now()))
    }
}

#[automock]
#[async_trait]
pub trait AgentsService: Send + Sync {
    /// Agents matching the filters, oldest first.
    async fn list_agents(
        &self,
        filters: AgentFilters,
    ) -> Result<Vec<AgentRecord>, AgentsServiceError>;

    async fn get_agent(&self, agent: AgentUuid) -> Result<AgentRecord, AgentsServiceError>;

    /// Validate and register a new agent, initially `Available`.
    async fn create_agent(&self, agent: NewAgent) -> Result<AgentRecord, AgentsServiceError>;

    async fn update_agent(
        &self,
        agent: AgentUuid,
        update: AgentUpdate,
    ) -> Result<AgentRecord, AgentsServiceError>;

    /// Move an agent along the status transition graph.
    async fn update_status(
        &self,
        agent: AgentUuid,
        change: StatusChange,
    ) -> Result<AgentRecord, AgentsServiceError>;

    async fn delete_agent(&self, agent: AgentUuid) -> Result<(), AgentsServiceError>;

    /// Per-status counts and percentages across all agents.
    async fn status_summary(&self) -> Result<StatusSummary, AgentsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::agents::{records::Department, store::InMemoryAgentStore};

    use super::*;

    fn service() -> StoreAgentsService {
        StoreAgentsService::new(Arc::new(InMemoryAgentStore::new()))
    }

    fn new_agent(code: &str) -> NewAgent {
        NewAgent {
            agent_code: code.to_string(),
            name: "Napat Srisuk".to_string(),
            email: format!("{}@example.com", code.to_lowercase()),
            department: None,
            skills: Some(vec!["Thai".to_string()]),
        }
    }

    fn change(status: &str) -> StatusChange {
        StatusChange {
            status: status.to_string(),
            reason: None,
        }
    }

    #[tokio::test]
    async fn create_agent_starts_available_in_general() -> TestResult {
        let agents = service();

        let agent = agents.create_agent(new_agent("A001")).await?;

        assert_eq!(agent.status, AgentStatus::Available);
        assert_eq!(agent.department, Department::General);
        assert_eq!(agent.created_at, agent.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_agent_collects_field_errors() {
        let agents = service();

        let result = agents
            .create_agent(NewAgent {
                agent_code: "bad".to_string(),
                email: "nope".to_string(),
                ..new_agent("A001")
            })
            .await;

        assert!(
            matches!(result, Err(AgentsServiceError::Invalid(ref errors)) if errors.len() == 2),
            "expected two field errors, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_agent_rejects_duplicate_code() -> TestResult {
        let agents = service();

        agents.create_agent(new_agent("A001")).await?;

        let result = agents.create_agent(new_agent("A001")).await;

        assert!(
            matches!(result, Err(AgentsServiceError::AlreadyExists(_))),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_agents_filters_in_creation_order() -> TestResult {
        let agents = service();

        let first = agents.create_agent(new_agent("A001")).await?;
        let second = agents
            .create_agent(NewAgent {
                department: Some("Sales".to_string()),
                ..new_agent("A002")
            })
            .await?;
        let third = agents.create_agent(new_agent("A003")).await?;

        agents.update_status(third.uuid, change("Busy")).await?;

        let all = agents.list_agents(AgentFilters::default()).await?;
        let codes: Vec<&str> = all.iter().map(|agent| agent.agent_code.as_str()).collect();

        assert_eq!(codes, vec!["A001", "A002", "A003"]);

        let available = agents
            .list_agents(AgentFilters {
                status: Some(AgentStatus::Available),
                ..AgentFilters::default()
            })
            .await?;

        assert_eq!(available.len(), 2);

        let sales = agents
            .list_agents(AgentFilters {
                department: Some(Department::Sales),
                status: Some(AgentStatus::Available),
            })
            .await?;

        assert_eq!(sales.first().map(|agent| agent.uuid), Some(second.uuid));
        assert_eq!(sales.len(), 1);
        assert_ne!(first.uuid, second.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_agent_is_not_found() {
        let result = service().get_agent(AgentUuid::new()).await;

        assert!(
            matches!(result, Err(AgentsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_agent_changes_supplied_fields_only() -> TestResult {
        let agents = service();
        let created = agents.create_agent(new_agent("A001")).await?;

        let updated = agents
            .update_agent(
                created.uuid,
                AgentUpdate {
                    department: Some("Technical".to_string()),
                    skills: Some(vec!["Go".to_string(), "Go".to_string()]),
                    ..AgentUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.department, Department::Technical);
        assert_eq!(updated.skills, vec!["Go".to_string()]);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.agent_code, "A001");
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn allowed_transition_records_reason() -> TestResult {
        let agents = service();
        let created = agents.create_agent(new_agent("A001")).await?;

        let updated = agents
            .update_status(
                created.uuid,
                StatusChange {
                    status: "Break".to_string(),
                    reason: Some("Lunch".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.status, AgentStatus::Break);
        assert_eq!(updated.status_reason.as_deref(), Some("Lunch"));
        assert!(updated.status_changed_at >= created.status_changed_at);

        let again = agents.update_status(created.uuid, change("Offline")).await?;

        assert_eq!(again.status_reason, None);

        Ok(())
    }

    #[tokio::test]
    async fn disallowed_transition_leaves_status() -> TestResult {
        let agents = service();
        let created = agents.create_agent(new_agent("A001")).await?;

        let result = agents.update_status(created.uuid, change("Offline")).await;

        assert!(
            matches!(
                result,
                Err(AgentsServiceError::InvalidTransition {
                    from: AgentStatus::Available,
                    to: AgentStatus::Offline,
                    ..
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        assert_eq!(
            agents.get_agent(created.uuid).await?.status,
            AgentStatus::Available
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_is_invalid() -> TestResult {
        let agents = service();
        let created = agents.create_agent(new_agent("A001")).await?;

        let result = agents.update_status(created.uuid, change("Lunch")).await;

        assert!(
            matches!(result, Err(AgentsServiceError::InvalidStatus(ref status)) if status == "Lunch"),
            "expected InvalidStatus, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn status_of_missing_agent_is_not_found() {
        let result = service()
            .update_status(AgentUuid::new(), change("Lunch"))
            .await;

        assert!(
            matches!(result, Err(AgentsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn injected_table_overrides_default() -> TestResult {
        let agents = StoreAgentsService::with_transitions(
            Arc::new(InMemoryAgentStore::new()),
            StatusTransitions::new([(AgentStatus::Available, vec![AgentStatus::Offline])]),
        );

        let created = agents.create_agent(new_agent("A001")).await?;

        assert!(agents.update_status(created.uuid, change("Busy")).await.is_err());
        assert_eq!(
            agents
                .update_status(created.uuid, change("Offline"))
                .await?
                .status,
            AgentStatus::Offline
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_agent_is_hard_delete() -> TestResult {
        let agents = service();
        let created = agents.create_agent(new_agent("A001")).await?;

        agents.delete_agent(created.uuid).await?;

        assert!(agents.list_agents(AgentFilters::default()).await?.is_empty());

        let result = agents.delete_agent(created.uuid).await;

        assert!(
            matches!(result, Err(AgentsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        agents.create_agent(new_agent("A001")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn summary_counts_current_statuses() -> TestResult {
        let agents = service();

        agents.create_agent(new_agent("A001")).await?;
        agents.create_agent(new_agent("A002")).await?;
        let busy = agents.create_agent(new_agent("A003")).await?;
        agents.update_status(busy.uuid, change("Busy")).await?;

        let summary = agents.status_summary().await?;

        assert_eq!(summary.total_agents, 3);
        assert_eq!(
            summary.status_percentages.get(&AgentStatus::Available),
            Some(&67)
        );
        assert_eq!(summary.status_percentages.get(&AgentStatus::Busy), Some(&33));

        Ok(())
    }
}
