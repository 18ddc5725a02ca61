//! Auth error mapping.

use tracing::error;
use wallboard_app::auth::AuthServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::unauthorized("Invalid username"),
        AuthServiceError::AccountInactive => ApiError::unauthorized("User account is inactive"),
        AuthServiceError::InvalidToken => ApiError::unauthorized("Invalid or expired token"),
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            ApiError::internal()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            ApiError::internal()
        }
    }
}
