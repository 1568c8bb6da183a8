/// User model and database operations
///
/// Users are never removed from the table. Deactivation flips `active` to
/// false so projects and tasks that reference the user stay valid.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{NewUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, NewUser {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
/// })
/// .await?;
///
/// let found = User::find_by_email(&pool, "ada@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::now;

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Database-generated identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// False once the user has been deactivated
    pub active: bool,

    /// When the account was registered
    pub created_at: DateTime<Utc>,

    /// Last profile change or deactivation
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Input for a profile edit
///
/// Both fields are replaced. The active flag is not part of a profile edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
}

impl User {
    /// Inserts an active user with `created_at == updated_at == now`
    ///
    /// # Errors
    ///
    /// Fails with a database error on a duplicate email (`users_email_key`)
    /// or when the connection fails.
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<Self, sqlx::Error> {
        let created_at = now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, active, created_at, updated_at)
            VALUES ($1, $2, TRUE, $3, $3)
            RETURNING id, name, email, active, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Lists every user
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, active, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by exact email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Replaces name and email and bumps `updated_at`
    ///
    /// Returns false if no user has this ID.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.email)
        .bind(now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks the user inactive and bumps `updated_at`
    ///
    /// Returns false if no user has this ID.
    pub async fn deactivate(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET active = FALSE, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads only the `active` column
    ///
    /// `None` means the user does not exist.
    pub async fn find_active_flag(pool: &PgPool, id: i64) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar("SELECT active FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_all_fields() {
        let at = now();
        let user = User {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            active: true,
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["active"], true);
        assert!(json["created_at"].is_string());
    }
}
