/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User registration, lookup, edits and deactivation
/// - `projects`: Project CRUD with delete-or-deactivate
/// - `tasks`: Task CRUD and finishing

pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
