/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(150) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     email VARCHAR(254) NOT NULL DEFAULT '',
///     first_name VARCHAR(150) NOT NULL DEFAULT '',
///     last_name VARCHAR(150) NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use dealership_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "jdoe".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         email: "jdoe@example.com".to_string(),
///         first_name: "Jane".to_string(),
///         last_name: "Doe".to_string(),
///     },
/// )
/// .await?;
///
/// let found = User::find_by_username(&pool, "jdoe").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Argon2id PHC string, never plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,

    /// Already hashed password
    pub password_hash: String,

    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// A taken username surfaces as a database error whose
    /// `is_unique_violation()` is true.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, email, first_name, last_name,
                      created_at, last_login_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.email)
        .bind(data.first_name)
        .bind(data.last_name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, first_name, last_name,
                   created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Exact, case-sensitive username lookup
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, first_name, last_name,
                   created_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Stamps `last_login_at`; returns false if the user no longer exists
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_username(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "jdoe".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "jdoe");
        assert!(json.get("password_hash").is_none());
    }
}
