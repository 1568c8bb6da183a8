/// Database models
///
/// Row types for the three tables and the SQL that reads and writes them.
/// These functions do no business validation; the `store` module layers the
/// referential checks on top.
///
/// - `user`: user accounts (soft-deleted via `active`)
/// - `project`: projects owned by a creating user
/// - `task`: tasks with creator, optional assignee and optional project

use chrono::{DateTime, SubsecRound, Utc};

pub mod project;
pub mod task;
pub mod user;

/// Current time at whole-second granularity
///
/// Every timestamp the models write goes through here, so a task finished
/// within the same second it was created still has `finished_at >= created_at`.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn test_now_never_runs_ahead_of_clock() {
        let before = Utc::now();
        let truncated = now();
        assert!(truncated <= Utc::now());
        assert!(before.signed_duration_since(truncated).num_seconds() <= 1);
    }
}
