/// Project store
///
/// A project can only be created by an active user. Deleting a project that
/// tasks still reference deactivates it instead, so historical tasks keep a
/// valid project reference without cascading deletes.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::is_foreign_key_violation;
use super::{require_active, ActiveChecker, RecordFetcher, StoreError, StoreResult};
use crate::models::project::{NewProject, Project, UpdateProject};

#[derive(Clone)]
pub struct ProjectStore {
    pool: PgPool,
    users: Arc<dyn ActiveChecker>,
}

impl ProjectStore {
    pub fn new(pool: PgPool, users: Arc<dyn ActiveChecker>) -> Self {
        Self { pool, users }
    }

    /// Creates an active project
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the creator does not exist or is inactive.
    pub async fn create(&self, data: NewProject) -> StoreResult<Project> {
        if let Err(e) = require_active(self.users.as_ref(), data.created_by, "creator user").await {
            warn!(creator_id = data.created_by, error = %e, "Rejected project");
            return Err(e);
        }

        let project = Project::create(&self.pool, data)
            .await
            .map_err(StoreError::from_write)?;

        info!(project_id = project.id, creator_id = project.created_by, "Project created");
        Ok(project)
    }

    pub async fn query(&self) -> StoreResult<Vec<Project>> {
        Ok(Project::list(&self.pool).await?)
    }

    pub async fn query_by_id(&self, id: i64) -> StoreResult<Project> {
        Project::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("project", id))
    }

    /// Renames the project
    pub async fn update(&self, id: i64, data: UpdateProject) -> StoreResult<()> {
        if !Project::update(&self.pool, id, data).await? {
            return Err(StoreError::not_found("project", id));
        }

        info!(project_id = id, "Project updated");
        Ok(())
    }

    /// Deletes the project, or deactivates it if any task references it
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        if Project::has_tasks(&self.pool, id).await? {
            info!(project_id = id, "Project has tasks, deactivating instead of deleting");
            return self.deactivate(id).await;
        }

        match Project::delete(&self.pool, id).await {
            Ok(true) => {
                info!(project_id = id, "Project deleted");
                Ok(())
            }
            Ok(false) => Err(StoreError::not_found("project", id)),
            // A task was attached between the check and the delete
            Err(e) if is_foreign_key_violation(&e) => {
                info!(project_id = id, "Project gained a task, deactivating instead of deleting");
                self.deactivate(id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn deactivate(&self, id: i64) -> StoreResult<()> {
        if !Project::deactivate(&self.pool, id).await? {
            return Err(StoreError::not_found("project", id));
        }

        info!(project_id = id, "Project deactivated");
        Ok(())
    }

    pub async fn is_active(&self, id: i64) -> StoreResult<bool> {
        let active = Project::find_active_flag(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("project", id))?;

        debug!(project_id = id, active, "Checked project status");
        Ok(active)
    }
}

#[async_trait]
impl ActiveChecker for ProjectStore {
    async fn is_active(&self, id: i64) -> StoreResult<bool> {
        ProjectStore::is_active(self, id).await
    }
}

#[async_trait]
impl RecordFetcher<Project> for ProjectStore {
    async fn fetch(&self, id: i64) -> StoreResult<Project> {
        self.query_by_id(id).await
    }
}
