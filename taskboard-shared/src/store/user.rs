/// User store
///
/// Registration, profile edits and deactivation. There is no hard delete:
/// projects and tasks keep pointing at deactivated users.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{ActiveChecker, RecordFetcher, StoreError, StoreResult};
use crate::models::user::{NewUser, UpdateUser, User};

#[derive(Debug, Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers an active user
    ///
    /// # Errors
    ///
    /// `Conflict` if the email is already registered.
    pub async fn create(&self, data: NewUser) -> StoreResult<User> {
        let user = User::create(&self.pool, data)
            .await
            .map_err(StoreError::from_write)?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn query(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    pub async fn query_by_id(&self, id: i64) -> StoreResult<User> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    pub async fn query_by_email(&self, email: &str) -> StoreResult<User> {
        User::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| StoreError::not_found("user", email))
    }

    /// Replaces name and email; the active flag is left alone
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown ID, `Conflict` if the new email belongs to
    /// another user.
    pub async fn update(&self, id: i64, data: UpdateUser) -> StoreResult<()> {
        let updated = User::update(&self.pool, id, data)
            .await
            .map_err(StoreError::from_write)?;

        if !updated {
            return Err(StoreError::not_found("user", id));
        }

        info!(user_id = id, "User updated");
        Ok(())
    }

    /// Soft-deletes the user
    pub async fn deactivate(&self, id: i64) -> StoreResult<()> {
        if !User::deactivate(&self.pool, id).await? {
            return Err(StoreError::not_found("user", id));
        }

        info!(user_id = id, "User deactivated");
        Ok(())
    }

    /// Single-column lookup used by dependent stores
    pub async fn is_active(&self, id: i64) -> StoreResult<bool> {
        let active = User::find_active_flag(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))?;

        debug!(user_id = id, active, "Checked user status");
        Ok(active)
    }
}

#[async_trait]
impl ActiveChecker for UserStore {
    async fn is_active(&self, id: i64) -> StoreResult<bool> {
        UserStore::is_active(self, id).await
    }
}

#[async_trait]
impl RecordFetcher<User> for UserStore {
    async fn fetch(&self, id: i64) -> StoreResult<User> {
        self.query_by_id(id).await
    }
}
