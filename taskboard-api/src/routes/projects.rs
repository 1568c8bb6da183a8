/// Project endpoints
///
/// # Endpoints
///
/// - `POST /api/projects` - Create a project (creator must be active)
/// - `GET /api/projects` - List projects
/// - `GET /api/projects/:id` - Get one project
/// - `PUT /api/projects/:id` - Rename
/// - `DELETE /api/projects/:id` - Delete, or deactivate if tasks reference it
/// - `POST /api/projects/:id/deactivate` - Deactivate

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::project::{NewProject, Project, UpdateProject};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// ID of the creating user
    pub created_by: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Create a project
///
/// ```text
/// POST /api/projects
/// Content-Type: application/json
///
/// { "name": "Website relaunch", "created_by": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the creator is missing or inactive
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;

    let project = state
        .projects
        .create(NewProject {
            name: req.name,
            created_by: req.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.projects.query().await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    Ok(Json(state.projects.query_by_id(id).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .projects
        .update(id, UpdateProject { name: req.name })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a project
///
/// Answers 204 in both outcomes; a project with tasks is left in place
/// with `active = false`.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deactivate_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_bounds() {
        let empty = UpdateProjectRequest { name: String::new() };
        assert!(empty.validate().is_err());

        let long = UpdateProjectRequest { name: "x".repeat(256) };
        assert!(long.validate().is_err());

        let ok = CreateProjectRequest {
            name: "x".repeat(255),
            created_by: 1,
        };
        assert!(ok.validate().is_ok());
    }
}
