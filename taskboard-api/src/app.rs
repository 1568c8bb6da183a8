/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::store::{ProjectStore, TaskStore, UserStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    pub users: Arc<UserStore>,
    pub projects: Arc<ProjectStore>,
    pub tasks: Arc<TaskStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the stores over one pool
    ///
    /// The project store checks creators through the user store; the task
    /// store checks users and projects through both.
    pub fn new(db: PgPool, config: Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let projects = Arc::new(ProjectStore::new(db.clone(), users.clone()));
        let tasks = Arc::new(TaskStore::new(db.clone(), users.clone(), projects.clone()));

        Self {
            db,
            users,
            projects,
            tasks,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                         # Health check
/// └── /api/
///     ├── /users/
///     │   ├── POST   /                # Register
///     │   ├── GET    /                # List
///     │   ├── GET    /:id
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id             # Deactivate
///     │   └── GET    /email/:email
///     ├── /projects/
///     │   ├── POST   /
///     │   ├── GET    /
///     │   ├── GET    /:id
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id             # Delete or deactivate
///     │   └── POST   /:id/deactivate
///     └── /tasks/
///         ├── POST   /
///         ├── GET    /                # With creator/assignee names
///         ├── GET    /:id
///         ├── PUT    /:id
///         ├── DELETE /:id
///         └── PUT    /:id/finish
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, projects, tasks, users};

    let user_routes = Router::new()
        .route("/", post(users::create_user).get(users::list_users))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::deactivate_user),
        )
        .route("/email/:email", get(users::get_user_by_email));

    let project_routes = Router::new()
        .route("/", post(projects::create_project).get(projects::list_projects))
        .route(
            "/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/:id/deactivate", post(projects::deactivate_project));

    let task_routes = Router::new()
        .route("/", post(tasks::create_task).get(tasks::list_tasks))
        .route(
            "/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/:id/finish", put(tasks::finish_task));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
