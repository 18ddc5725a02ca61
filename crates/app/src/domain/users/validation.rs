//! Username, name and role/team rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::users::{
    errors::UsersServiceError,
    records::{Role, TeamId},
};

const USERNAME_PATTERN: &str = r"^(AG|SP|AD)(00[1-9]|0[1-9]\d|[1-9]\d{2})$";

/// Minimum length of a user's full name, in characters.
pub const MIN_FULL_NAME_CHARS: usize = 2;

#[expect(clippy::expect_used, reason = "pattern is a fixed literal")]
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("username pattern should compile"));

/// Two-letter role prefix followed by a zero-padded number in `001..=999`.
#[must_use]
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Role encoded by the username prefix, if any.
#[must_use]
pub fn role_from_username(username: &str) -> Option<Role> {
    match username.get(..2)? {
        "AG" => Some(Role::Agent),
        "SP" => Some(Role::Supervisor),
        "AD" => Some(Role::Admin),
        _ => None,
    }
}

pub(crate) fn validate_full_name(full_name: &str) -> Result<(), UsersServiceError> {
    if full_name.trim().chars().count() < MIN_FULL_NAME_CHARS {
        return Err(UsersServiceError::Validation(format!(
            "Full name must be at least {MIN_FULL_NAME_CHARS} characters"
        )));
    }

    Ok(())
}

/// Apply the role/team rule to the effective role and team.
///
/// Agents and supervisors need a team; admins never keep one.
pub(crate) fn resolve_team(
    role: Role,
    team: Option<TeamId>,
) -> Result<Option<TeamId>, UsersServiceError> {
    if !role.requires_team() {
        return Ok(None);
    }

    team.map(Some).ok_or_else(|| {
        UsersServiceError::Validation(
            "Team ID is required for Agent and Supervisor roles".to_string(),
        )
    })
}
