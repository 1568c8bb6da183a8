//! # Taskboard Shared Library
//!
//! Persistence and business rules for users, projects and tasks, used by the
//! Taskboard API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and schema migrations
//! - `models`: row types and their SQL
//! - `store`: per-entity stores enforcing referential rules

pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
