//! Update Agent Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::agents::{AgentsServiceError, data::StatusChange};

use crate::{
    agents::{
        errors::{into_api_error, parse_agent_uuid},
        get::AgentEnvelope,
    },
    envelope::{ApiError, FieldErrorResponse},
    extensions::*,
    observability,
    state::State,
};

/// Status Change Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct StatusChangeRequest {
    /// Target status: Available, Busy, Break or Offline
    pub status: String,

    /// Optional note, at most 200 characters
    pub reason: Option<String>,
}

impl From<StatusChangeRequest> for StatusChange {
    fn from(request: StatusChangeRequest) -> Self {
        StatusChange {
            status: request.status,
            reason: request.reason,
        }
    }
}

/// Update Agent Status Handler
///
/// Moves the agent along the status transition graph.
#[endpoint(
    tags("agents"),
    summary = "Update Agent Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Agent not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status or transition"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<StatusChangeRequest>,
    depot: &mut Depot,
) -> Result<Json<AgentEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let agent = parse_agent_uuid(&id.into_inner())?;

    let agent = state
        .app
        .agents
        .update_status(agent, json.into_inner().into())
        .await
        .map_err(|error| match error {
            AgentsServiceError::Invalid(fields) => {
                ApiError::bad_request("Status validation failed")
                    .with_fields(fields.into_iter().map(FieldErrorResponse::from))
            }
            other => into_api_error(other),
        })?;

    observability::record_status_change(agent.status);

    Ok(Json(AgentEnvelope::new(
        "Agent status updated successfully",
        agent,
    )))
}
