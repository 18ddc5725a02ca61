//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("username already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("team does not exist")]
    TeamNotFound,

    #[error("cannot delete yourself")]
    SelfDelete,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::TeamNotFound,
            Some(ErrorKind::NotNullViolation) => {
                Self::Validation("missing required user data".to_string())
            }
            Some(ErrorKind::CheckViolation) => Self::Validation("invalid user data".to_string()),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
