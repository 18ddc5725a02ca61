//! Users Repository

use jiff::Timestamp;
use sqlx::{
    FromRow, QueryBuilder, Row, Sqlite, SqlitePool, query, query_as, query_scalar,
    sqlite::SqliteRow,
};
use tracing::debug;

use crate::{
    database::{timestamp_from_column, timestamp_to_column},
    domain::{
        patch::Patch,
        users::{
            data::{UserChanges, UserFilters, UserRow},
            records::{UserId, UserRecord},
        },
    },
};

const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const USERNAME_EXISTS_SQL: &str = include_str!("sql/username_exists.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const SOFT_DELETE_USER_SQL: &str = include_str!("sql/soft_delete_user.sql");
const TOUCH_LAST_LOGIN_SQL: &str = include_str!("sql/touch_last_login.sql");

#[derive(Debug, Clone)]
pub(crate) struct SqliteUsersRepository {
    pool: SqlitePool,
}

impl SqliteUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        name = "users.repository.list_users",
        skip(self),
        fields(user_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_users(
        &self,
        filters: UserFilters,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let users = build_list_query(filters)
            .build_query_as::<UserRecord>()
            .fetch_all(&self.pool)
            .await?;

        tracing::Span::current().record("user_count", users.len());

        Ok(users)
    }

    pub(crate) async fn find_user(&self, user: UserId) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Sqlite, UserRecord>(FIND_USER_SQL)
            .bind(user.get())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Sqlite, UserRecord>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        query_scalar::<Sqlite, bool>(USERNAME_EXISTS_SQL)
            .bind(username)
            .fetch_one(&self.pool)
            .await
    }

    #[tracing::instrument(
        name = "users.repository.create_user",
        skip(self, row),
        fields(username = %row.username, role = %row.role),
        err
    )]
    pub(crate) async fn create_user(&self, row: UserRow) -> Result<UserId, sqlx::Error> {
        let created_at = timestamp_to_column(row.created_at);

        let id = query(CREATE_USER_SQL)
            .bind(row.username)
            .bind(row.full_name)
            .bind(row.role.as_str())
            .bind(row.team_id.map(|team| team.get()))
            .bind(row.status.as_str())
            .bind(created_at)
            .bind(created_at)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        debug!(user_id = id, "created user");

        Ok(UserId::new(id))
    }

    #[tracing::instrument(name = "users.repository.update_user", skip(self, changes), err)]
    pub(crate) async fn update_user(
        &self,
        user: UserId,
        changes: UserChanges,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = build_update_query(user, changes)
            .build()
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(name = "users.repository.soft_delete_user", skip(self), err)]
    pub(crate) async fn soft_delete_user(
        &self,
        user: UserId,
        deleted_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let deleted_at = timestamp_to_column(deleted_at);

        let rows_affected = query(SOFT_DELETE_USER_SQL)
            .bind(deleted_at)
            .bind(deleted_at)
            .bind(user.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn touch_last_login(
        &self,
        user: UserId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_LAST_LOGIN_SQL)
            .bind(timestamp_to_column(at))
            .bind(user.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn build_list_query(filters: UserFilters) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(LIST_USERS_SQL);

    if let Some(role) = filters.role {
        builder.push(" AND u.role = ").push_bind(role.as_str());
    }

    if let Some(status) = filters.status {
        builder.push(" AND u.status = ").push_bind(status.as_str());
    }

    if let Some(team) = filters.team_id {
        builder.push(" AND u.teamId = ").push_bind(team.get());
    }

    builder.push(" ORDER BY u.createdAt DESC, u.id DESC");

    builder
}

/// `UPDATE` touching `updatedAt` plus exactly the changed columns.
pub(crate) fn build_update_query(user: UserId, changes: UserChanges) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new("UPDATE users SET updatedAt = ");
    builder.push_bind(timestamp_to_column(changes.updated_at));

    if let Some(full_name) = changes.full_name {
        builder.push(", fullName = ").push_bind(full_name);
    }

    if let Some(role) = changes.role {
        builder.push(", role = ").push_bind(role.as_str());
    }

    match changes.team_id {
        Patch::Absent => {}
        Patch::Null => {
            builder.push(", teamId = NULL");
        }
        Patch::Value(team) => {
            builder.push(", teamId = ").push_bind(team.get());
        }
    }

    if let Some(status) = changes.status {
        builder.push(", status = ").push_bind(status.as_str());
    }

    builder
        .push(" WHERE id = ")
        .push_bind(user.get())
        .push(" AND deletedAt IS NULL");

    builder
}

fn decode_column<T>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;

    raw.parse().map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

impl<'r> FromRow<'r, SqliteRow> for UserRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let optional_timestamp = |column: &str| -> sqlx::Result<Option<Timestamp>> {
            row.try_get::<Option<i64>, _>(column)?
                .map(|micros| timestamp_from_column(micros, column))
                .transpose()
        };

        Ok(Self {
            id: UserId::new(row.try_get("id")?),
            username: row.try_get("username")?,
            full_name: row.try_get("fullName")?,
            role: decode_column(row, "role")?,
            team_id: row.try_get::<Option<i64>, _>("teamId")?.map(Into::into),
            team_name: row.try_get("teamName")?,
            status: decode_column(row, "status")?,
            created_at: timestamp_from_column(row.try_get("createdAt")?, "createdAt")?,
            updated_at: timestamp_from_column(row.try_get("updatedAt")?, "updatedAt")?,
            last_login_at: optional_timestamp("lastLoginAt")?,
            deleted_at: optional_timestamp("deletedAt")?,
        })
    }
}
