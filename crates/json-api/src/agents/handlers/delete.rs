//! Delete Agent Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    agents::errors::{into_api_error, parse_agent_uuid},
    envelope::{ApiError, MessageResponse},
    extensions::*,
    state::State,
};

/// Delete Agent Handler
#[endpoint(
    tags("agents"),
    summary = "Delete Agent",
    responses(
        (status_code = StatusCode::OK, description = "Agent deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Agent not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let agent = parse_agent_uuid(&id.into_inner())?;

    state
        .app
        .agents
        .delete_agent(agent)
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new("Agent deleted successfully")))
}
