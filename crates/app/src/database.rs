//! Database connection management

use std::str::FromStr;

use jiff::Timestamp;
use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// Connect to `SQLite` and apply pending migrations.
///
/// The database file is created when missing and foreign key enforcement is
/// switched on for every pooled connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or migrations fail.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(DatabaseError::Connect)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connect)?;

    migrate(&pool).await.map_err(DatabaseError::Migrate)?;

    Ok(pool)
}

/// Apply the workspace migrations to the given pool.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Timestamps are persisted as integer microseconds since the Unix epoch.
pub(crate) fn timestamp_to_column(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

pub(crate) fn timestamp_from_column(micros: i64, column: &str) -> Result<Timestamp, sqlx::Error> {
    Timestamp::from_microsecond(micros).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn timestamp_columns_keep_microsecond_precision() -> TestResult {
        let timestamp: Timestamp = "2026-02-21T12:00:00.123456Z".parse()?;

        let decoded = timestamp_from_column(timestamp_to_column(timestamp), "createdAt")?;

        assert_eq!(decoded, timestamp);

        Ok(())
    }

    #[test]
    fn out_of_range_column_is_a_decode_error() {
        let result = timestamp_from_column(i64::MAX, "createdAt");

        assert!(
            matches!(result, Err(sqlx::Error::ColumnDecode { ref index, .. }) if index == "createdAt"),
            "expected ColumnDecode, got {result:?}"
        );
    }
}
