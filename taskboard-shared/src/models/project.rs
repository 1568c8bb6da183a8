/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL,
///     created_by BIGINT NOT NULL REFERENCES users(id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::now;

/// A project owned by the user who created it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,

    /// False once deactivated, either directly or by a delete that found
    /// dependent tasks
    pub active: bool,

    pub created_at: DateTime<Utc>,

    /// ID of the creating user
    pub created_by: i64,
}

/// Input for creating a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub created_by: i64,
}

/// Input for renaming a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: String,
}

impl Project {
    /// Inserts an active project
    ///
    /// The caller is responsible for checking that `created_by` is an active
    /// user; the foreign key only guarantees existence.
    pub async fn create(pool: &PgPool, data: NewProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO project (name, active, created_at, created_by)
            VALUES ($1, TRUE, $2, $3)
            RETURNING id, name, active, created_at, created_by
            "#,
        )
        .bind(data.name)
        .bind(now())
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Lists every project
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, active, created_at, created_by
            FROM project
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, active, created_at, created_by
            FROM project
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Renames a project; false if it does not exist
    pub async fn update(pool: &PgPool, id: i64, data: UpdateProject) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE project SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(data.name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets `active = FALSE`; false if the project does not exist
    pub async fn deactivate(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE project SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes the row; false if it did not exist
    ///
    /// Fails with a foreign key violation if a task still references the
    /// project. Use the project store's delete, which checks first.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether any task references this project
    pub async fn has_tasks(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM task WHERE project_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Reads only the `active` column; `None` if the project does not exist
    pub async fn find_active_flag(pool: &PgPool, id: i64) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar("SELECT active FROM project WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
