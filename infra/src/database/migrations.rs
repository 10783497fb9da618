//! Schema migrations
//!
//! Idempotent; safe to run on every startup.

use sqlx::SqlitePool;
use tracing::info;

use crate::InfrastructureError;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )
"#;

const CREATE_SESSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        login_at TIMESTAMP NOT NULL,
        expires_at INTEGER NOT NULL,
        logged_out_at TIMESTAMP NULL
    )
"#;

const CREATE_SESSIONS_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions (expires_at)";

/// Create the `users` and `sessions` tables if they do not exist
pub async fn run(pool: &SqlitePool) -> Result<(), InfrastructureError> {
    info!("Running database migrations");

    let mut tx = pool.begin().await?;
    for statement in [CREATE_USERS, CREATE_SESSIONS, CREATE_SESSIONS_EXPIRY_INDEX] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database migrations completed");
    Ok(())
}
