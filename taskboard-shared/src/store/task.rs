/// Task store
///
/// Create validates, in this order, the project (if given), the creator and
/// the assignee (if given). The first failure is returned and nothing is
/// inserted. Update re-validates a new assignee the same way.
///
/// Delete has no dependency checks; nothing references a task.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

use super::{require_active, ActiveChecker, RecordFetcher, StoreError, StoreResult};
use crate::models::project::Project;
use crate::models::task::{NewTask, Task, TaskDetail, TaskStatus, UpdateTask};

#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
    users: Arc<dyn ActiveChecker>,
    projects: Arc<dyn RecordFetcher<Project>>,
}

impl TaskStore {
    pub fn new(
        pool: PgPool,
        users: Arc<dyn ActiveChecker>,
        projects: Arc<dyn RecordFetcher<Project>>,
    ) -> Self {
        Self {
            pool,
            users,
            projects,
        }
    }

    /// Creates an open task after checking every reference
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the project, creator or assignee is missing or
    /// inactive.
    pub async fn create(&self, data: NewTask) -> StoreResult<Task> {
        if let Err(e) = self.validate_new(&data).await {
            warn!(
                creator_id = data.created_by,
                assignee_id = ?data.assigned_to,
                project_id = ?data.project_id,
                error = %e,
                "Rejected task"
            );
            return Err(e);
        }

        let task = Task::create(&self.pool, data)
            .await
            .map_err(StoreError::from_write)?;

        info!(task_id = task.id, creator_id = task.created_by, "Task created");
        Ok(task)
    }

    async fn validate_new(&self, data: &NewTask) -> StoreResult<()> {
        if let Some(project_id) = data.project_id {
            self.require_active_project(project_id).await?;
        }

        require_active(self.users.as_ref(), data.created_by, "creator user").await?;

        if let Some(assignee_id) = data.assigned_to {
            require_active(self.users.as_ref(), assignee_id, "assigned user").await?;
        }

        Ok(())
    }

    async fn require_active_project(&self, project_id: i64) -> StoreResult<()> {
        match self.projects.fetch(project_id).await {
            Ok(project) if project.active => Ok(()),
            Ok(_) => Err(StoreError::ValidationFailed(format!(
                "project with ID {project_id} is not active"
            ))),
            Err(e) if e.is_not_found() => Err(StoreError::ValidationFailed(format!(
                "project with ID {project_id} does not exist"
            ))),
            Err(e) => Err(e),
        }
    }

    pub async fn query(&self) -> StoreResult<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }

    /// All tasks with creator and assignee names
    pub async fn query_detailed(&self) -> StoreResult<Vec<TaskDetail>> {
        Ok(Task::list_detailed(&self.pool).await?)
    }

    pub async fn query_by_id(&self, id: i64) -> StoreResult<Task> {
        Task::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("task", id))
    }

    /// Replaces title, description and assignee
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the new assignee is missing or inactive,
    /// `NotFound` for an unknown task.
    pub async fn update(&self, id: i64, data: UpdateTask) -> StoreResult<()> {
        if let Some(assignee_id) = data.assigned_to {
            if let Err(e) = require_active(self.users.as_ref(), assignee_id, "assigned user").await {
                warn!(task_id = id, assignee_id, error = %e, "Rejected task update");
                return Err(e);
            }
        }

        let updated = Task::update(&self.pool, id, data)
            .await
            .map_err(StoreError::from_write)?;

        if !updated {
            return Err(StoreError::not_found("task", id));
        }

        info!(task_id = id, "Task updated");
        Ok(())
    }

    /// Unconditional hard delete
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        if !Task::delete(&self.pool, id).await? {
            return Err(StoreError::not_found("task", id));
        }

        info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// Stamps `finished_at` with the current second
    ///
    /// A finished task may be finished again; the timestamp moves forward.
    pub async fn finish(&self, id: i64) -> StoreResult<()> {
        if !Task::finish(&self.pool, id).await? {
            return Err(StoreError::not_found("task", id));
        }

        info!(task_id = id, status = TaskStatus::Finished.as_str(), "Task finished");
        Ok(())
    }
}
