//! Database module - SQLite implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Session and account repositories
//! - Schema migrations

pub mod connection;
pub mod migrations;
pub mod sqlite;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use sqlite::{SqliteSessionRepository, SqliteUserRepository};
