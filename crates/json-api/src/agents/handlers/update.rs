//! Update Agent Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::agents::data::AgentUpdate;

use crate::{
    agents::{
        errors::{into_api_error, parse_agent_uuid},
        get::AgentEnvelope,
    },
    envelope::ApiError,
    extensions::*,
    state::State,
};

/// Update Agent Request
///
/// Only the supplied fields change. The agent code is fixed at creation.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct UpdateAgentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl From<UpdateAgentRequest> for AgentUpdate {
    fn from(request: UpdateAgentRequest) -> Self {
        AgentUpdate {
            name: request.name,
            email: request.email,
            department: request.department,
            skills: request.skills,
        }
    }
}

/// Update Agent Handler
#[endpoint(
    tags("agents"),
    summary = "Update Agent",
    responses(
        (status_code = StatusCode::OK, description = "Agent updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Agent not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdateAgentRequest>,
    depot: &mut Depot,
) -> Result<Json<AgentEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let agent = parse_agent_uuid(&id.into_inner())?;

    let agent = state
        .app
        .agents
        .update_agent(agent, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(AgentEnvelope::new("Agent updated successfully", agent)))
}
