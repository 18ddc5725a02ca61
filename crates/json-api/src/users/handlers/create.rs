//! Create User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::users::data::NewUser;

use super::{parse_role, parse_status};
use crate::{
    envelope::ApiError,
    extensions::*,
    state::State,
    users::{errors::into_api_error, get::UserEnvelope},
};

/// Create User Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateUserRequest {
    /// Role prefix plus three digits, e.g. `AG001`
    pub username: String,

    pub full_name: String,

    /// Agent, Supervisor or Admin
    pub role: Option<String>,

    /// Required for agents and supervisors
    pub team_id: Option<i64>,

    /// Active or Inactive; defaults to Active
    pub status: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(NewUser {
            username: request.username,
            full_name: request.full_name,
            role: request.role.as_deref().map(parse_role).transpose()?,
            team_id: request.team_id.map(Into::into),
            status: request.status.as_deref().map(parse_status).transpose()?,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
        (status_code = StatusCode::CONFLICT, description = "Username already exists"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = NewUser::try_from(json.into_inner())?;

    let user = state
        .app
        .users
        .create_user(user)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/users/{}", user.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(
        UserEnvelope::new(user).with_message("User created successfully"),
    ))
}
