//! List Agents Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::agents::{
    data::AgentFilters,
    records::{AgentStatus, Department},
};

use crate::{
    agents::{errors::into_api_error, get::AgentResponse},
    envelope::ApiError,
    extensions::*,
    state::State,
};

/// Agent List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AgentsEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<AgentResponse>,
}

fn parse_filter<T: std::str::FromStr>(
    value: Option<String>,
    field: &str,
) -> Result<Option<T>, ApiError> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse()
                .map_err(|_ignored| ApiError::bad_request(format!("Invalid {field} filter: {value}")))
        })
        .transpose()
}

/// List Agents Handler
///
/// Returns every agent matching the optional status and department filters,
/// oldest first.
#[endpoint(
    tags("agents"),
    summary = "List Agents",
    responses(
        (status_code = StatusCode::OK, description = "Agents listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown filter value"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    department: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AgentsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filters = AgentFilters {
        status: parse_filter::<AgentStatus>(status.into_inner(), "status")?,
        department: parse_filter::<Department>(department.into_inner(), "department")?,
    };

    let agents = state
        .app
        .agents
        .list_agents(filters)
        .await
        .map_err(into_api_error)?;

    Ok(Json(AgentsEnvelope {
        success: true,
        message: "Agents retrieved successfully".to_string(),
        data: agents.into_iter().map(Into::into).collect(),
    }))
}
