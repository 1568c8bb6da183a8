/// Stores: validation and persistence per entity
///
/// Each store owns one table and layers business rules over the SQL in
/// `models`. Stores that depend on another entity reach it only through the
/// capability traits below, so tests can wire them to fakes.
///
/// ```text
/// TaskStore ──ActiveChecker──────────▶ UserStore
///     │
///     └──────RecordFetcher<Project>──▶ ProjectStore ──ActiveChecker──▶ UserStore
/// ```
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sqlx::PgPool;
/// use taskboard_shared::models::task::NewTask;
/// use taskboard_shared::store::{ProjectStore, TaskStore, UserStore};
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let users = Arc::new(UserStore::new(pool.clone()));
/// let projects = Arc::new(ProjectStore::new(pool.clone(), users.clone()));
/// let tasks = TaskStore::new(pool, users, projects);
///
/// let task = tasks
///     .create(NewTask {
///         title: "Ship it".to_string(),
///         description: String::new(),
///         created_by: 1,
///         assigned_to: None,
///         project_id: None,
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

pub mod error;
pub mod project;
pub mod task;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{StoreError, StoreResult};
pub use project::ProjectStore;
pub use task::TaskStore;
pub use user::UserStore;

/// Answers whether a record is currently usable
#[async_trait]
pub trait ActiveChecker: Send + Sync {
    /// # Errors
    ///
    /// `StoreError::NotFound` when no record has this ID.
    async fn is_active(&self, id: i64) -> StoreResult<bool>;
}

/// Loads a whole record by ID
#[async_trait]
pub trait RecordFetcher<R>: Send + Sync {
    /// # Errors
    ///
    /// `StoreError::NotFound` when no record has this ID.
    async fn fetch(&self, id: i64) -> StoreResult<R>;
}

/// Fails with `ValidationFailed` unless `id` refers to an active record
///
/// `role` names the reference in the message, e.g. "creator user".
pub(crate) async fn require_active(
    checker: &dyn ActiveChecker,
    id: i64,
    role: &str,
) -> StoreResult<()> {
    match checker.is_active(id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StoreError::ValidationFailed(format!(
            "{role} with ID {id} is not active"
        ))),
        Err(e) if e.is_not_found() => Err(StoreError::ValidationFailed(format!(
            "{role} with ID {id} does not exist"
        ))),
        Err(e) => Err(e),
    }
}
