//! List Users Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::users::{data::UserFilters, records::TeamId};

use super::{parse_role, parse_status};
use crate::{
    envelope::ApiError,
    extensions::*,
    state::State,
    users::{errors::into_api_error, get::UserResponse},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UserQuery {
    role: Option<String>,
    status: Option<String>,
    team_id: Option<String>,
}

impl UserQuery {
    /// Drop parameters sent with an empty value, e.g. `?role=`.
    fn non_empty(self) -> Self {
        let present = |value: Option<String>| value.filter(|value| !value.is_empty());

        Self {
            role: present(self.role),
            status: present(self.status),
            team_id: present(self.team_id),
        }
    }
}

fn parse_team_id(value: &str) -> Result<TeamId, ApiError> {
    value
        .parse::<i64>()
        .map(TeamId::new)
        .map_err(|_ignored| ApiError::bad_request(format!("Invalid teamId filter: {value}")))
}

/// User List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersEnvelope {
    pub success: bool,
    pub data: Vec<UserResponse>,
    pub count: usize,
}

/// List Users Handler
///
/// Returns live users, newest first. `role`, `status` and `teamId` query
/// parameters narrow the list.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Users listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown filter value"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UsersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = req
        .parse_queries::<UserQuery>()
        .map_err(|_ignored| ApiError::bad_request("Invalid query parameters"))?
        .non_empty();

    let filters = UserFilters {
        role: query.role.as_deref().map(parse_role).transpose()?,
        status: query.status.as_deref().map(parse_status).transpose()?,
        team_id: query.team_id.as_deref().map(parse_team_id).transpose()?,
    };

    let users = state
        .app
        .users
        .list_users(filters)
        .await
        .map_err(into_api_error)?;

    let data: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(UsersEnvelope {
        success: true,
        count: data.len(),
        data,
    }))
}
