//! Tests for the SQLite stores


use crate::database::{migrations, DatabasePool};
use ta_shared::config::DatabaseConfig;

/// Fresh migrated in-memory database
pub(crate) async fn memory_pool() -> DatabasePool {
    let pool = DatabasePool::new(DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    migrations::run(pool.get_pool()).await.unwrap();
    pool
}
