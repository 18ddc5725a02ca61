//! Users

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::UsersServiceError;
pub use service::*;

pub(crate) use repository::SqliteUsersRepository;
