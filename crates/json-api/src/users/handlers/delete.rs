//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    envelope::{ApiError, MessageResponse},
    extensions::*,
    state::State,
    users::errors::{into_api_error, parse_user_id},
};

/// Delete User Handler
///
/// Soft-deletes a user. Users cannot delete themselves.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cannot delete yourself"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requested_by = depot.claims_or_401()?.user_id;

    state
        .app
        .users
        .delete_user(parse_user_id(&id.into_inner())?, Some(requested_by))
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
