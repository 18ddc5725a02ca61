//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, SqliteAuthService, TokenIssuer},
    database::{self, DatabaseError},
    domain::{
        agents::{AgentsService, InMemoryAgentStore, StoreAgentsService},
        users::{SqliteUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialise database")]
    Database(#[from] DatabaseError),
}

#[derive(Clone)]
pub struct AppContext {
    pub agents: Arc<dyn AgentsService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and token secret.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_config(database_url: &str, jwt_secret: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url).await?;
        let tokens = TokenIssuer::new(jwt_secret.as_bytes());

        Ok(Self {
            agents: Arc::new(StoreAgentsService::new(Arc::new(InMemoryAgentStore::new()))),
            users: Arc::new(SqliteUsersService::new(pool.clone())),
            auth: Arc::new(SqliteAuthService::new(pool, tokens)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
