/// Router tests that need no database
///
/// The router sits on a pool pointing at a closed port, so anything that
/// reaches a store answers 500. A 400 therefore shows the request was
/// rejected before any statement ran.

mod common;

use axum::http::StatusCode;
use common::{offline_app, send};
use serde_json::json;

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = offline_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["schema"], "unknown");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_invalid_user_payload_is_rejected() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name"]);
}

#[tokio::test]
async fn test_blank_task_title_is_rejected() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "", "created_by": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_overlong_project_name_is_rejected() {
    let app = offline_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/projects/1",
        Some(json!({ "name": "p".repeat(256) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = offline_app();

    let (status, _) = send(&app, "GET", "/api/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_database_failure_hides_details() {
    let app = offline_app();

    let (status, body) = send(&app, "GET", "/api/users/1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = offline_app();

    let (status, _) = send(&app, "GET", "/api/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = offline_app();

    let (status, _) = send(&app, "POST", "/api/tasks/1/finish", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
