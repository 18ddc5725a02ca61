//! User Errors

use tracing::error;

use wallboard_app::domain::users::{UsersServiceError, records::UserId};

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::Validation(message) => ApiError::bad_request(message),
        UsersServiceError::AlreadyExists => ApiError::conflict("Username already exists"),
        UsersServiceError::NotFound => ApiError::not_found("User not found"),
        UsersServiceError::TeamNotFound => ApiError::not_found("Team not found"),
        UsersServiceError::SelfDelete => {
            ApiError::bad_request("Cannot delete your own account")
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            ApiError::internal()
        }
    }
}

/// Parse a user id path segment.
///
/// User ids are integers, so anything else cannot name a user.
pub(crate) fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    id.parse::<i64>()
        .map(UserId::new)
        .map_err(|_ignored| into_api_error(UsersServiceError::NotFound))
}
