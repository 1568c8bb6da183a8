/// User endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Register a user
/// - `GET /api/users` - List users
/// - `GET /api/users/:id` - Get one user
/// - `GET /api/users/email/:email` - Look a user up by email
/// - `PUT /api/users/:id` - Edit name and email
/// - `DELETE /api/users/:id` - Deactivate (users are never removed)

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::user::{NewUser, UpdateUser, User};
use validator::Validate;

/// Registration and profile edit payload
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Register a new user
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = state
        .users
        .create(NewUser {
            name: req.name,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.query().await?))
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(state.users.query_by_id(id).await?))
}

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.query_by_email(&email).await?))
}

/// Replace name and email
///
/// # Errors
///
/// - `404 Not Found`: Unknown user
/// - `409 Conflict`: Email belongs to another user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .users
        .update(
            id,
            UpdateUser {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.users.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_request_validation() {
        let ok = UserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = UserRequest {
            name: String::new(),
            email: "ada".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
