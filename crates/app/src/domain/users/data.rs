//! Users Data

use jiff::Timestamp;

use crate::domain::{
    patch::Patch,
    users::records::{Role, TeamId, UserStatus},
};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub role: Option<Role>,
    pub team_id: Option<TeamId>,
    pub status: Option<UserStatus>,
}

/// User Update Data
///
/// Every field is optional; only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// Accepted only when it matches the stored username.
    pub username: Option<String>,
    pub full_name: Patch<String>,
    pub role: Patch<Role>,
    pub team_id: Patch<TeamId>,
    pub status: Patch<UserStatus>,
}

/// User list filters; supplied filters are combined with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub team_id: Option<TeamId>,
}

/// Validated row for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserRow {
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
    pub status: UserStatus,
    pub created_at: Timestamp,
}

/// Validated column changes for a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserChanges {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub team_id: Patch<TeamId>,
    pub status: Option<UserStatus>,
    pub updated_at: Timestamp,
}
