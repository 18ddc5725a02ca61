//! Users service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::SqlitePool;
use tracing::info;

use crate::domain::{
    patch::Patch,
    users::{
        data::{NewUser, UserChanges, UserFilters, UserRow, UserUpdate},
        errors::UsersServiceError,
        records::{UserId, UserRecord},
        repository::SqliteUsersRepository,
        validation::{resolve_team, validate_full_name, validate_username},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteUsersService {
    repository: SqliteUsersRepository,
}

impl SqliteUsersService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: SqliteUsersRepository::new(pool),
        }
    }

    async fn require_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .find_user(user)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }

    /// Write `changes` and re-read the row. A row deleted since it was read
    /// affects nothing and is reported as missing.
    async fn apply_changes(
        &self,
        user: UserId,
        changes: UserChanges,
    ) -> Result<UserRecord, UsersServiceError> {
        let rows_affected = self.repository.update_user(user, changes).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        self.require_user(user).await
    }

    async fn mark_deleted(&self, user: UserId, at: Timestamp) -> Result<(), UsersServiceError> {
        let rows_affected = self.repository.soft_delete_user(user, at).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        Ok(())
    }
}

/// Next `updatedAt` value, strictly after `previous` even when the clock has
/// not moved on.
fn advance(previous: Timestamp) -> Timestamp {
    let floor = previous
        .checked_add(SignedDuration::from_micros(1))
        .unwrap_or(previous);

    Timestamp::now().max(floor)
}

fn reject_null<T>(patch: &Patch<T>, field: &str) -> Result<(), UsersServiceError> {
    if matches!(patch, Patch::Null) {
        return Err(UsersServiceError::Validation(format!(
            "{field} cannot be null"
        )));
    }

    Ok(())
}

#[async_trait]
impl UsersService for SqliteUsersService {
    async fn list_users(&self, filters: UserFilters) -> Result<Vec<UserRecord>, UsersServiceError> {
        Ok(self.repository.list_users(filters).await?)
    }

    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        self.require_user(user).await
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if !validate_username(&user.username) {
            return Err(UsersServiceError::Validation(
                "Invalid username format".to_string(),
            ));
        }

        if self.repository.username_exists(&user.username).await? {
            return Err(UsersServiceError::AlreadyExists);
        }

        let role = user.role.ok_or_else(|| {
            UsersServiceError::Validation("Role is required".to_string())
        })?;

        validate_full_name(&user.full_name)?;

        let team_id = resolve_team(role, user.team_id)?;

        let id = self
            .repository
            .create_user(UserRow {
                username: user.username,
                full_name: user.full_name.trim().to_string(),
                role,
                team_id,
                status: user.status.unwrap_or_default(),
                created_at: Timestamp::now(),
            })
            .await?;

        info!(user_id = %id, %role, "user created");

        self.require_user(id).await
    }

    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let existing = self.require_user(user).await?;

        if update
            .username
            .as_deref()
            .is_some_and(|username| username != existing.username)
        {
            return Err(UsersServiceError::Validation(
                "Username cannot be changed".to_string(),
            ));
        }

        reject_null(&update.full_name, "fullName")?;
        reject_null(&update.role, "role")?;
        reject_null(&update.status, "status")?;

        let full_name = match update.full_name {
            Patch::Value(full_name) => {
                validate_full_name(&full_name)?;
                Some(full_name.trim().to_string())
            }
            Patch::Absent | Patch::Null => None,
        };

        let role = update.role.or_existing(None);
        let effective_role = role.unwrap_or(existing.role);

        let team_supplied = !update.team_id.is_absent();
        let effective_team = update.team_id.or_existing(existing.team_id);
        let resolved_team = resolve_team(effective_role, effective_team)?;

        let team_id = if !team_supplied && resolved_team == existing.team_id {
            Patch::Absent
        } else {
            Patch::from(resolved_team)
        };

        let changes = UserChanges {
            full_name,
            role,
            team_id,
            status: update.status.or_existing(None),
            updated_at: advance(existing.updated_at),
        };

        self.apply_changes(user, changes).await
    }

    async fn delete_user(
        &self,
        user: UserId,
        requested_by: Option<UserId>,
    ) -> Result<(), UsersServiceError> {
        let existing = self.require_user(user).await?;

        if requested_by == Some(user) {
            return Err(UsersServiceError::SelfDelete);
        }

        self.mark_deleted(user, advance(existing.updated_at)).await?;

        info!(user_id = %user, "user soft-deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Non-deleted users matching every supplied filter, newest first.
    async fn list_users(&self, filters: UserFilters) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Retrieve a single non-deleted user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Validate and insert a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Apply a partial update, writing only the supplied fields.
    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Soft-delete a user. `requested_by` may not be the user itself.
    async fn delete_user(
        &self,
        user: UserId,
        requested_by: Option<UserId>,
    ) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_as;
    use testresult::TestResult;

    use crate::{
        domain::users::records::{Role, TeamId, UserStatus},
        test::TestContext,
    };

    use super::*;

    fn agent(username: &str, team: i64) -> NewUser {
        NewUser {
            username: username.to_string(),
            full_name: "Alice Agent".to_string(),
            role: Some(Role::Agent),
            team_id: Some(TeamId::new(team)),
            status: None,
        }
    }

    fn admin(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            full_name: "Ada Admin".to_string(),
            role: Some(Role::Admin),
            team_id: None,
            status: None,
        }
    }

    #[test]
    fn advance_moves_past_future_timestamps() -> TestResult {
        let ahead = Timestamp::now().checked_add(SignedDuration::from_hours(1))?;

        assert!(advance(ahead) > ahead);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_returns_row_with_team_name() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(agent("AG001", 1)).await?;

        assert_eq!(user.username, "AG001");
        assert_eq!(user.role, Role::Agent);
        assert_eq!(user.team_id, Some(TeamId::new(1)));
        assert_eq!(user.team_name.as_deref(), Some("Team Alpha"));
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.last_login_at.is_none());
        assert!(user.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_bad_username() {
        let ctx = TestContext::new().await;

        let result = ctx.users.create_user(agent("AG000", 1)).await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_user_requires_role() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(NewUser {
                role: None,
                ..agent("AG001", 1)
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_username() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.create_user(agent("AG001", 1)).await?;

        let result = ctx.users.create_user(agent("AG001", 2)).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_supervisor_without_team_fails() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(NewUser {
                role: Some(Role::Supervisor),
                team_id: None,
                ..agent("SP001", 1)
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_admin_drops_team() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(NewUser {
                team_id: Some(TeamId::new(2)),
                ..admin("AD001")
            })
            .await?;

        assert_eq!(user.team_id, None);
        assert_eq!(user.team_name, None);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_with_unknown_team_is_team_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.create_user(agent("AG001", 99)).await;

        assert!(
            matches!(result, Err(UsersServiceError::TeamNotFound)),
            "expected TeamNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_user_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserId::new(404)).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_users_filters_and_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.users.create_user(agent("AG001", 1)).await?;
        let second = ctx.users.create_user(agent("AG002", 2)).await?;
        let third = ctx.users.create_user(agent("AG003", 1)).await?;
        ctx.users.create_user(admin("AD001")).await?;

        let team_one = ctx
            .users
            .list_users(UserFilters {
                role: Some(Role::Agent),
                team_id: Some(TeamId::new(1)),
                ..UserFilters::default()
            })
            .await?;

        let ids: Vec<UserId> = team_one.iter().map(|user| user.id).collect();

        assert_eq!(ids, vec![third.id, first.id]);

        let all = ctx.users.list_users(UserFilters::default()).await?;

        assert_eq!(all.len(), 4);
        assert!(all.iter().any(|user| user.id == second.id));

        Ok(())
    }

    #[tokio::test]
    async fn update_status_only_leaves_other_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    status: Patch::Value(UserStatus::Inactive),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.full_name, created.full_name);
        assert_eq!(updated.role, created.role);
        assert_eq!(updated.team_id, created.team_id);
        assert!(updated.updated_at > created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn empty_update_still_advances_updated_at() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let first = ctx
            .users
            .update_user(created.id, UserUpdate::default())
            .await?;

        let second = ctx
            .users
            .update_user(created.id, UserUpdate::default())
            .await?;

        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_username_change() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    username: Some("AG002".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_accepts_unchanged_username() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    username: Some("AG001".to_string()),
                    full_name: Patch::Value("Alice Renamed".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.full_name, "Alice Renamed");

        Ok(())
    }

    #[tokio::test]
    async fn update_clearing_team_of_agent_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    team_id: Patch::Null,
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_to_admin_clears_team() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    role: Patch::Value(Role::Admin),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.team_id, None);
        assert_eq!(updated.team_name, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_admin_to_supervisor_needs_team() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(admin("AD001")).await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    role: Patch::Value(Role::Supervisor),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    role: Patch::Value(Role::Supervisor),
                    team_id: Patch::Value(TeamId::new(3)),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.team_name.as_deref(), Some("Team Gamma"));

        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_null_full_name() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    full_name: Patch::Null,
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_to_unknown_team_is_team_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    team_id: Patch::Value(TeamId::new(42)),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::TeamNotFound)),
            "expected TeamNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_user(UserId::new(7), UserUpdate::default())
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_user_soft_deletes_row() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        ctx.users.delete_user(created.id, None).await?;

        let result = ctx.users.get_user(created.id).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        assert!(
            ctx.users
                .list_users(UserFilters::default())
                .await?
                .is_empty()
        );

        let (status, deleted_at): (String, Option<i64>) =
            query_as("SELECT status, deletedAt FROM users WHERE id = ?")
                .bind(created.id.get())
                .fetch_one(&ctx.pool)
                .await?;

        assert_eq!(status, "Inactive");
        assert!(deleted_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn delete_self_is_refused() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(admin("AD001")).await?;

        let result = ctx.users.delete_user(created.id, Some(created.id)).await;

        assert!(
            matches!(result, Err(UsersServiceError::SelfDelete)),
            "expected SelfDelete, got {result:?}"
        );

        assert_eq!(ctx.users.get_user(created.id).await?.id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        ctx.users.delete_user(created.id, None).await?;

        let result = ctx.users.delete_user(created.id, None).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_of_row_deleted_after_read_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        ctx.users
            .repository
            .soft_delete_user(created.id, Timestamp::now())
            .await?;

        let changes = UserChanges {
            full_name: Some("Too Late".to_string()),
            role: None,
            team_id: Patch::Absent,
            status: None,
            updated_at: advance(created.updated_at),
        };

        let result = ctx.users.apply_changes(created.id, changes).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_of_row_deleted_after_read_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.users.create_user(agent("AG001", 1)).await?;

        ctx.users
            .repository
            .soft_delete_user(created.id, Timestamp::now())
            .await?;

        let result = ctx
            .users
            .mark_deleted(created.id, advance(created.updated_at))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
