/// Task model and database operations
///
/// # State Machine
///
/// ```text
/// open --finish--> finished
/// ```
///
/// The state is not stored as its own column: a task is finished exactly when
/// `finished_at` is set. Nothing clears `finished_at`, so a finished task never
/// reopens.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL,
///     finished_at TIMESTAMPTZ,
///     created_by BIGINT NOT NULL REFERENCES users(id),
///     assigned_to BIGINT REFERENCES users(id),
///     project_id BIGINT REFERENCES project(id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::now;

/// Derived task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not finished yet
    Open,

    /// `finished_at` has been set
    Finished,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Finished => "finished",
        }
    }

    /// Checks if state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Finished)
    }

    /// Checks if transition to target state is valid
    ///
    /// Finishing a finished task is allowed and moves `finished_at` forward.
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        matches!(
            (self, target),
            (TaskStatus::Open, TaskStatus::Finished) | (TaskStatus::Finished, TaskStatus::Finished)
        )
    }
}

/// A task row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,

    /// Set when the task was finished, null while open
    pub finished_at: Option<DateTime<Utc>>,

    /// User who created the task
    pub created_by: i64,

    /// User the task is assigned to, if any
    pub assigned_to: Option<i64>,

    /// Project the task belongs to, if any
    pub project_id: Option<i64>,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        if self.finished_at.is_some() {
            TaskStatus::Finished
        } else {
            TaskStatus::Open
        }
    }
}

/// A task together with the names of its creator and assignee
///
/// Read-only convenience for listings; not a separate invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,

    pub created_by_name: String,
    pub assigned_to_name: Option<String>,
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub created_by: i64,

    #[serde(default)]
    pub assigned_to: Option<i64>,

    #[serde(default)]
    pub project_id: Option<i64>,
}

/// Input for editing a task
///
/// All three fields are replaced; `assigned_to: None` clears the assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub assigned_to: Option<i64>,
}

impl Task {
    /// Inserts an open task
    ///
    /// No referential validation happens here beyond the foreign keys.
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO task (title, description, created_at, finished_at,
                              created_by, assigned_to, project_id)
            VALUES ($1, $2, $3, NULL, $4, $5, $6)
            RETURNING id, title, description, created_at, finished_at,
                      created_by, assigned_to, project_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(now())
        .bind(data.created_by)
        .bind(data.assigned_to)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists every task
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_at, finished_at,
                   created_by, assigned_to, project_id
            FROM task
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists every task with creator and assignee names joined in
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskDetail>(
            r#"
            SELECT t.id, t.title, t.description, t.created_at, t.finished_at,
                   t.created_by, t.assigned_to, t.project_id,
                   creator.name AS created_by_name,
                   assignee.name AS assigned_to_name
            FROM task t
            JOIN users creator ON creator.id = t.created_by
            LEFT JOIN users assignee ON assignee.id = t.assigned_to
            ORDER BY t.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_at, finished_at,
                   created_by, assigned_to, project_id
            FROM task
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Replaces title, description and assignee; false if the task is missing
    pub async fn update(pool: &PgPool, id: i64, data: UpdateTask) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE task
            SET title = $2, description = $3, assigned_to = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.assigned_to)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets `finished_at` to now; false if the task is missing
    ///
    /// An existing later timestamp is kept, so `finished_at` never moves back.
    pub async fn finish(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE task SET finished_at = GREATEST(finished_at, $2) WHERE id = $1")
            .bind(id)
            .bind(now())
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes the task; false if it did not exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
