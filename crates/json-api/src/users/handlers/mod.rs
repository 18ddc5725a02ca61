//! User Handlers

use std::str::FromStr;

use wallboard_app::domain::{
    patch::Patch,
    users::records::{Role, UserStatus},
};

use crate::envelope::ApiError;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

fn parse_enum<T: FromStr>(value: &str, message: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_ignored| ApiError::bad_request(message))
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
    parse_enum(value, "Role must be one of: Agent, Supervisor, Admin")
}

fn parse_status(value: &str) -> Result<UserStatus, ApiError> {
    parse_enum(value, "Status must be one of: Active, Inactive")
}

fn parse_patch<T>(
    patch: Patch<String>,
    parse: fn(&str) -> Result<T, ApiError>,
) -> Result<Patch<T>, ApiError> {
    Ok(match patch {
        Patch::Absent => Patch::Absent,
        Patch::Null => Patch::Null,
        Patch::Value(value) => Patch::Value(parse(&value)?),
    })
}
