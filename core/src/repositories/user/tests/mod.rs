//! Unit tests for mock user repository

use crate::domain::entities::user::NewUser;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();

    let created = repo
        .create(NewUser::new("alice@example.com", "alice", "Alice", "hash"))
        .await
        .unwrap();

    let by_email = repo.find_by_email("alice@example.com").await.unwrap();
    let by_username = repo.find_by_username("alice").await.unwrap();

    assert_eq!(by_email.map(|u| u.id), Some(created.id));
    assert_eq!(by_username.map(|u| u.id), Some(created.id));
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_rejects_duplicate_username() {
    let repo = MockUserRepository::new();
    repo.create(NewUser::new("a@example.com", "alice", "Alice", "hash"))
        .await
        .unwrap();

    let result = repo
        .create(NewUser::new("b@example.com", "alice", "Other", "hash"))
        .await;

    assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    assert_eq!(repo.count().await, 1);
}
