//! Status Summary Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::agents::{records::AgentStatus, summary::StatusSummary};

use crate::{agents::errors::into_api_error, envelope::ApiError, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryResponse {
    pub total_agents: usize,

    /// Agents per status, keyed by status name
    pub status_counts: BTreeMap<String, usize>,

    /// Whole percentages per status; the total may differ from 100
    pub status_percentages: BTreeMap<String, usize>,

    pub last_updated: String,
}

fn by_name(values: BTreeMap<AgentStatus, usize>) -> BTreeMap<String, usize> {
    values
        .into_iter()
        .map(|(status, value)| (status.to_string(), value))
        .collect()
}

impl From<StatusSummary> for SummaryResponse {
    fn from(summary: StatusSummary) -> Self {
        SummaryResponse {
            total_agents: summary.total_agents,
            status_counts: by_name(summary.status_counts),
            status_percentages: by_name(summary.status_percentages),
            last_updated: summary.last_updated.to_string(),
        }
    }
}

/// Status Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryEnvelope {
    pub success: bool,
    pub message: String,
    pub data: SummaryResponse,
}

/// Status Summary Handler
///
/// Head-count of agents per status, for the wallboard.
#[endpoint(
    tags("agents"),
    summary = "Agent Status Summary",
    responses(
        (status_code = StatusCode::OK, description = "Summary computed"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SummaryEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let summary = state
        .app
        .agents
        .status_summary()
        .await
        .map_err(into_api_error)?;

    Ok(Json(SummaryEnvelope {
        success: true,
        message: "Status summary retrieved successfully".to_string(),
        data: summary.into(),
    }))
}
