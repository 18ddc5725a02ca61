//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;

use wallboard_app::domain::{patch::Patch, users::data::UserUpdate};

use super::{parse_patch, parse_role, parse_status};
use crate::{
    envelope::ApiError,
    extensions::*,
    state::State,
    users::{
        errors::{into_api_error, parse_user_id},
        get::UserEnvelope,
    },
};

/// Update User Request
///
/// A missing key leaves the field alone. `teamId: null` removes the user
/// from their team.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserRequest {
    /// Must match the stored username if supplied
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub full_name: Patch<String>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub role: Patch<String>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub team_id: Patch<i64>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub status: Patch<String>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(UserUpdate {
            username: request.username,
            full_name: request.full_name,
            role: parse_patch(request.role, parse_role)?,
            team_id: request.team_id.map(Into::into),
            status: parse_patch(request.status, parse_status)?,
        })
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::NOT_FOUND, description = "User or team not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = UserUpdate::try_from(json.into_inner())?;

    let user = state
        .app
        .users
        .update_user(parse_user_id(&id.into_inner())?, update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(
        UserEnvelope::new(user).with_message("User updated successfully"),
    ))
}
