//! Get User Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use wallboard_app::domain::users::records::UserRecord;

use crate::{
    envelope::ApiError,
    extensions::*,
    state::State,
    users::errors::{into_api_error, parse_user_id},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: i64,

    /// Role prefix plus three digits, e.g. `AG001`
    pub username: String,

    pub full_name: String,
    pub role: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.id.get(),
            username: user.username,
            full_name: user.full_name,
            role: user.role.to_string(),
            team_id: user.team_id.map(|team| team.get()),
            team_name: user.team_name,
            status: user.status.to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
            last_login_at: user.last_login_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Single User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: UserResponse,
}

impl UserEnvelope {
    pub(crate) fn new(user: UserRecord) -> Self {
        Self {
            success: true,
            message: None,
            data: user.into(),
        }
    }

    #[must_use]
    pub(crate) fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Get User Handler
///
/// Returns a user that has not been deleted.
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(parse_user_id(&id.into_inner())?)
        .await
        .map_err(into_api_error)?;

    Ok(Json(UserEnvelope::new(user)))
}
