//! Auth data models.

use crate::domain::users::records::{Role, TeamId, UserId, UserRecord};

/// Public view of the user who just logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            team_id: user.team_id,
            team_name: user.team_name,
        }
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: AuthenticatedUser,
    pub token: String,
    pub expires_in: &'static str,
}
