/// Task endpoints
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks` - List tasks with creator and assignee names
/// - `GET /api/tasks/:id` - Get one task
/// - `PUT /api/tasks/:id` - Edit title, description and assignee
/// - `DELETE /api/tasks/:id` - Delete
/// - `PUT /api/tasks/:id/finish` - Mark finished

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::task::{NewTask, Task, TaskDetail, UpdateTask};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub created_by: i64,

    #[serde(default)]
    pub assigned_to: Option<i64>,

    #[serde(default)]
    pub project_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Omitted or null clears the assignee
    #[serde(default)]
    pub assigned_to: Option<i64>,
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Prepare release notes",
///   "description": "Summarize merged changes",
///   "created_by": 1,
///   "assigned_to": 2,
///   "project_id": 4
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the project, creator or
///   assignee is missing or inactive (checked in that order)
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = state
        .tasks
        .create(NewTask {
            title: req.title,
            description: req.description,
            created_by: req.created_by,
            assigned_to: req.assigned_to,
            project_id: req.project_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskDetail>>> {
    Ok(Json(state.tasks.query_detailed().await?))
}

pub async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Task>> {
    Ok(Json(state.tasks.query_by_id(id).await?))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .tasks
        .update(
            id,
            UpdateTask {
                title: req.title,
                description: req.description,
                assigned_to: req.assigned_to,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn finish_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.finish(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"Write docs","created_by":1}"#).unwrap();

        assert_eq!(req.description, "");
        assert!(req.assigned_to.is_none());
        assert!(req.project_id.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"title":"","assigned_to":null}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
