/// Error type shared by all stores
///
/// The presentation layer maps these kinds onto transport responses:
/// `NotFound` → 404, `ValidationFailed` → 400, `Conflict` → 409 and
/// `Internal` → 500 without exposing the underlying message.

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Unique constraint on `users.email`
const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup by ID or email found nothing
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// A referenced record is missing or inactive, or the input is malformed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A uniqueness rule was violated (duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Internal(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Classifies an error raised by an INSERT or UPDATE
    ///
    /// Duplicate emails become `Conflict`, dangling references become
    /// `ValidationFailed`, everything else stays `Internal`.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if db_err.constraint() == Some(USERS_EMAIL_CONSTRAINT) {
                    return StoreError::Conflict("email already exists".to_string());
                }
                return StoreError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ValidationFailed(format!(
                    "referenced record does not exist ({})",
                    db_err.constraint().unwrap_or("foreign key")
                ));
            }
        }

        StoreError::Internal(err)
    }
}

/// Whether a write failed because a row is still referenced
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("task", 42);
        assert_eq!(err.to_string(), "task 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_display() {
        let err = StoreError::ValidationFailed("creator user with ID 3 is not active".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: creator user with ID 3 is not active"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_write_keeps_non_database_errors_internal() {
        let err = StoreError::from_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Internal(sqlx::Error::RowNotFound)));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }
}
