//! Get Agent Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wallboard_app::domain::agents::records::AgentRecord;

use crate::{
    agents::errors::{into_api_error, parse_agent_uuid},
    envelope::ApiError,
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AgentResponse {
    /// The unique identifier of the agent
    pub id: Uuid,

    /// Letter followed by three digits, e.g. `A001`
    pub agent_code: String,

    pub name: String,
    pub email: String,
    pub department: String,
    pub skills: Vec<String>,

    /// Current availability: Available, Busy, Break or Offline
    pub status: String,

    /// Reason given with the last status change
    pub status_reason: Option<String>,

    /// When the agent last changed status
    pub last_status_change: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<AgentRecord> for AgentResponse {
    fn from(agent: AgentRecord) -> Self {
        AgentResponse {
            id: agent.uuid.into_uuid(),
            agent_code: agent.agent_code,
            name: agent.name,
            email: agent.email,
            department: agent.department.to_string(),
            skills: agent.skills,
            status: agent.status.to_string(),
            status_reason: agent.status_reason,
            last_status_change: agent.status_changed_at.to_string(),
            created_at: agent.created_at.to_string(),
            updated_at: agent.updated_at.to_string(),
        }
    }
}

/// Single Agent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AgentEnvelope {
    pub success: bool,
    pub message: String,
    pub data: AgentResponse,
}

impl AgentEnvelope {
    pub(crate) fn new(message: &str, agent: AgentRecord) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: agent.into(),
        }
    }
}

/// Get Agent Handler
///
/// Returns an agent.
#[endpoint(
    tags("agents"),
    summary = "Get Agent",
    responses(
        (status_code = StatusCode::OK, description = "Agent found"),
        (status_code = StatusCode::NOT_FOUND, description = "Agent not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<AgentEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let agent = parse_agent_uuid(&id.into_inner())?;

    let agent = state
        .app
        .agents
        .get_agent(agent)
        .await
        .map_err(into_api_error)?;

    Ok(Json(AgentEnvelope::new(
        "Agent retrieved successfully",
        agent,
    )))
}
