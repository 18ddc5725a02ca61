//! Create Agent Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::agents::data::NewAgent;

use crate::{
    agents::{errors::into_api_error, get::AgentEnvelope},
    envelope::ApiError,
    extensions::*,
    state::State,
};

/// Create Agent Request
///
/// Missing text fields are reported as field errors rather than rejected
/// outright.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateAgentRequest {
    pub agent_code: String,
    pub name: String,
    pub email: String,

    /// Defaults to General
    pub department: Option<String>,

    pub skills: Option<Vec<String>>,
}

impl From<CreateAgentRequest> for NewAgent {
    fn from(request: CreateAgentRequest) -> Self {
        NewAgent {
            agent_code: request.agent_code,
            name: request.name,
            email: request.email,
            department: request.department,
            skills: request.skills,
        }
    }
}

/// Create Agent Handler
#[endpoint(
    tags("agents"),
    summary = "Create Agent",
    responses(
        (status_code = StatusCode::CREATED, description = "Agent created"),
        (status_code = StatusCode::CONFLICT, description = "Agent code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAgentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AgentEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let agent = state
        .app
        .agents
        .create_agent(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/agents/{}", agent.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(AgentEnvelope::new("Agent created successfully", agent)))
}
