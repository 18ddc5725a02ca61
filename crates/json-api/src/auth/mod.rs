//! Authentication

pub(crate) mod errors;
pub(crate) mod login;
pub(crate) mod middleware;
