//! Unit tests for the mock revocation index

use std::time::Duration;

use crate::repositories::revocation::{CacheOp, MockRevocationIndex, RevocationIndex};

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_ttl() {
    let index = MockRevocationIndex::new();
    index
        .set_with_ttl("access:a", "42", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(index.get("access:a").await.unwrap().as_deref(), Some("42"));

    tokio::time::advance(Duration::from_secs(61)).await;

    assert!(index.get("access:a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_batch_applies_every_op() {
    let index = MockRevocationIndex::new();
    index
        .set_with_ttl("refresh:r", "a", Duration::from_secs(60))
        .await
        .unwrap();

    index
        .exec_batch(&[
            CacheOp::delete("refresh:r"),
            CacheOp::set("access:a", "42", Duration::from_secs(60)),
        ])
        .await
        .unwrap();

    assert_eq!(index.live_keys().await, vec!["access:a".to_string()]);
}

#[tokio::test]
async fn test_set_while_live_requires_anchor() {
    let index = MockRevocationIndex::new();

    let written = index
        .set_while_live("refresh:r", "access:a", "42", Duration::from_secs(60))
        .await
        .unwrap();
    assert!(!written);
    assert!(index.get("access:a").await.unwrap().is_none());

    index
        .set_with_ttl("refresh:r", "a", Duration::from_secs(60))
        .await
        .unwrap();
    let written = index
        .set_while_live("refresh:r", "access:a", "42", Duration::from_secs(60))
        .await
        .unwrap();
    assert!(written);
    assert_eq!(index.get("access:a").await.unwrap().as_deref(), Some("42"));
}
