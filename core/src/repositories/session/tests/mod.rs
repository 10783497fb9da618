//! Unit tests for mock session repository

use chrono::{Duration, Utc};

use crate::domain::entities::session::Session;
use crate::errors::DomainError;
use crate::repositories::session::{MockSessionRepository, SessionRepository};

fn session(id: &str, expires_in: Duration) -> Session {
    let now = Utc::now();
    Session::new(id, 42, now, (now + expires_in).timestamp())
}

#[tokio::test]
async fn test_duplicate_id_is_already_exists() {
    let repo = MockSessionRepository::new();
    repo.create(&session("s1", Duration::days(1))).await.unwrap();

    let result = repo.create(&session("s1", Duration::days(1))).await;

    assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_mark_logged_out_stamps_row() {
    let repo = MockSessionRepository::new();
    repo.create(&session("s1", Duration::days(1))).await.unwrap();

    let at = Utc::now();
    assert!(repo.mark_logged_out("s1", at).await.unwrap());
    assert!(!repo.mark_logged_out("missing", at).await.unwrap());

    let stored = repo.find_by_id("s1").await.unwrap().unwrap();
    assert_eq!(stored.logged_out_at, Some(at));
}

#[tokio::test]
async fn test_delete_expired_keeps_live_rows() {
    let repo = MockSessionRepository::new();
    repo.insert(session("old", Duration::seconds(-10))).await;
    repo.insert(session("live", Duration::days(1))).await;

    let removed = repo.delete_expired(Utc::now()).await.unwrap();

    assert_eq!(removed, 1);
    assert!(repo.find_by_id("live").await.unwrap().is_some());
    assert!(repo.find_by_id("old").await.unwrap().is_none());
}
