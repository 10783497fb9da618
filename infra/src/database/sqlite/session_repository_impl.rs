//! SQLite implementation of the SessionRepository trait.
//!
//! One row per login, keyed by the refresh token `jti`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use ta_core::domain::entities::session::Session;
use ta_core::errors::DomainError;
use ta_core::repositories::SessionRepository;

use super::map_write_error;

/// SQLite implementation of SessionRepository
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &SqliteRow) -> Result<Session, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::persistence(format!("Failed to get {}: {}", name, e))
        };

        Ok(Session {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            user_id: row.try_get("user_id").map_err(|e| column("user_id", e))?,
            login_at: row
                .try_get::<DateTime<Utc>, _>("login_at")
                .map_err(|e| column("login_at", e))?,
            expires_at: row.try_get("expires_at").map_err(|e| column("expires_at", e))?,
            logged_out_at: row
                .try_get::<Option<DateTime<Utc>>, _>("logged_out_at")
                .map_err(|e| column("logged_out_at", e))?,
        })
    }
}

fn query_failed(e: sqlx::Error) -> DomainError {
    DomainError::persistence(format!("Database query failed: {}", e))
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO sessions (id, user_id, login_at, expires_at, logged_out_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.id)
            .bind(session.user_id)
            .bind(session.login_at)
            .bind(session.expires_at)
            .bind(session.logged_out_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("session", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, user_id, login_at, expires_at, logged_out_at
            FROM sessions
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_logged_out(&self, id: &str, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE sessions SET logged_out_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected())
    }
}
