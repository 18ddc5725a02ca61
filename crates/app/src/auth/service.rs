//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    auth::{AuthServiceError, LoginOutcome, TOKEN_EXPIRES_IN, TokenClaims, TokenIssuer},
    domain::users::{SqliteUsersRepository, records::UserStatus},
};

#[derive(Debug, Clone)]
pub struct SqliteAuthService {
    repository: SqliteUsersRepository,
    tokens: TokenIssuer,
}

impl SqliteAuthService {
    #[must_use]
    pub fn new(pool: SqlitePool, tokens: TokenIssuer) -> Self {
        Self {
            repository: SqliteUsersRepository::new(pool),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for SqliteAuthService {
    async fn login_without_password(
        &self,
        username: &str,
    ) -> Result<LoginOutcome, AuthServiceError> {
        let user = self
            .repository
            .find_user_by_username(username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if user.status != UserStatus::Active {
            return Err(AuthServiceError::AccountInactive);
        }

        let now = Timestamp::now();
        let token = self.tokens.issue(&user, now)?;

        let repository = self.repository.clone();
        let user_id = user.id;

        tokio::spawn(async move {
            if let Err(error) = repository.touch_last_login(user_id, now).await {
                warn!(%user_id, error = %error, "failed to record last login");
            }
        });

        info!(user_id = %user.id, role = %user.role, "user logged in");

        Ok(LoginOutcome {
            user: user.into(),
            token,
            expires_in: TOKEN_EXPIRES_IN,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        Ok(self.tokens.verify(token)?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Look up an active user by username and issue a session token.
    async fn login_without_password(
        &self,
        username: &str,
    ) -> Result<LoginOutcome, AuthServiceError>;

    /// Verify a session token and return its claims.
    async fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError>;
}
