/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Row types and their SQL live in `models`; validation lives in `store`.

pub mod migrations;
pub mod pool;
