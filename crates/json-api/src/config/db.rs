//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://wallboard.db")]
    pub database_url: String,
}
