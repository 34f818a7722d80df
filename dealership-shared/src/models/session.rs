/// Login sessions
///
/// A session ties an opaque bearer token to a user for a bounded lifetime.
/// Only the SHA-256 digest of the token is stored (see
/// `auth::session_token`), so a leaked table dump cannot be replayed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token_hash CHAR(64) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::session_token::{generate_session_token, hash_session_token, is_well_formed};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A live session joined with its owner's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionUser {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
}

impl Session {
    /// Opens a session for `user_id`
    ///
    /// Returns the stored row together with the plaintext token. The token
    /// is not recoverable afterwards.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<(Self, String), sqlx::Error> {
        let (token, token_hash) = generate_session_token();
        let expires_at = Utc::now() + ttl;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok((session, token))
    }

    /// Resolves a presented token to its user, ignoring expired sessions
    ///
    /// Malformed tokens short-circuit to `None` without a query.
    pub async fn find_active_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<SessionUser>, sqlx::Error> {
        if !is_well_formed(token) {
            return Ok(None);
        }

        let session = sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT s.id AS session_id, u.id AS user_id, u.username
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(hash_session_token(token))
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Deletes the session behind `token`; true if one existed
    pub async fn delete_by_token(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        if !is_well_formed(token) {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(hash_session_token(token))
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Purges expired rows, returning how many were removed
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
