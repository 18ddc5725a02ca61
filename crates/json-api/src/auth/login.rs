//! Login Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use wallboard_app::auth::{AuthServiceError, AuthenticatedUser, LoginOutcome};

use crate::{
    auth::errors::into_api_error,
    envelope::ApiError,
    extensions::*,
    observability::{self, LoginResult},
    state::State,
};

/// Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Username, e.g. `AG001`
    #[serde(default)]
    pub username: String,
}

/// Logged-in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginUser {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<AuthenticatedUser> for LoginUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id.get(),
            username: user.username,
            full_name: user.full_name,
            role: user.role.to_string(),
            team_id: user.team_id.map(|team| team.get()),
            team_name: user.team_name,
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub success: bool,
    pub user: LoginUser,

    /// Bearer token for the user API
    pub token: String,

    pub expires_in: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            success: true,
            user: outcome.user.into(),
            token: outcome.token,
            expires_in: outcome.expires_in.to_string(),
        }
    }
}

/// Login Handler
///
/// Issues a session token for an active user. No password is checked.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Username missing"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown or inactive user"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    let result = state
        .app
        .auth
        .login_without_password(&request.username)
        .await;

    observability::record_login(match &result {
        Ok(_) => LoginResult::Accepted,
        Err(AuthServiceError::InvalidCredentials | AuthServiceError::AccountInactive) => {
            LoginResult::Refused
        }
        Err(_) => LoginResult::Failed,
    });

    let outcome = result.map_err(into_api_error)?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use wallboard_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::UserId,
    };

    use crate::{
        envelope::ErrorResponse,
        test_helpers::{auth_service, make_user},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login_without_password()
            .once()
            .withf(|username| username == "AG001")
            .return_once(|_| {
                Ok(LoginOutcome {
                    user: make_user(UserId::new(7)).into(),
                    token: "signed".to_string(),
                    expires_in: "24h",
                })
            });

        auth.expect_verify_token().never();

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "AG001" }))
            .send(&make_service(auth))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.token, "signed");
        assert_eq!(body.expires_in, "24h");
        assert_eq!(body.user.id, 7);
        assert_eq!(body.user.team_name.as_deref(), Some("Team Alpha"));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_username_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login_without_password().never();
        auth.expect_verify_token().never();

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "   " }))
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Username is required");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login_without_password()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        auth.expect_verify_token().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "AG404" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login_without_password()
            .once()
            .return_once(|_| Err(AuthServiceError::AccountInactive));

        auth.expect_verify_token().never();

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "AG002" }))
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.message, "User account is inactive");

        Ok(())
    }
}
