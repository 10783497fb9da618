//! SQLite implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use ta_core::domain::entities::user::{NewUser, User};
use ta_core::errors::DomainError;
use ta_core::repositories::UserRepository;

use super::map_write_error;

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    /// Database connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::persistence(format!("Failed to get {}: {}", name, e))
        };

        Ok(User {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            password_hash: row.try_get("password").map_err(|e| column("password", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT id, name, email, username, password, created_at FROM users WHERE {} = ? LIMIT 1",
            column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created_at = Utc::now();
        let query = r#"
            INSERT INTO users (name, email, username, password, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))?;

        Ok(user.into_user(result.last_insert_rowid(), created_at))
    }
}
