//! Tests for session (profile snapshot) tokens

use chrono::{Duration, Utc};

use super::fixtures::{access_signer, session_signer, Harness};
use crate::domain::entities::token::{Claims, SessionClaims};
use crate::errors::TokenError;
use crate::services::token::TokenSigner;

#[tokio::test]
async fn test_session_token_carries_profile_snapshot() {
    let h = Harness::new();

    let issued = h
        .session
        .create(42, "alice@example.com", "alice", "Alice")
        .unwrap();
    let validated = h.session.validate(&issued.details.token).unwrap();

    assert_eq!(validated.details.user_id, 42);
    assert_eq!(validated.email, "alice@example.com");
    assert_eq!(validated.username, "alice");
    assert_eq!(validated.name, "Alice");
    assert_eq!(validated.details.jti, issued.details.jti);
}

#[tokio::test]
async fn test_session_token_is_not_tracked_in_revocation_index() {
    let h = Harness::new();

    h.session.create(42, "a@b.c", "alice", "Alice").unwrap();

    assert_eq!(h.index.write_count(), 0);
    assert!(h.index.live_keys().await.is_empty());
}

#[tokio::test]
async fn test_session_token_survives_logout() {
    let h = Harness::new();
    let refresh = h.refresh.create(42).await.unwrap();
    let session = h.session.create(42, "a@b.c", "alice", "Alice").unwrap();

    h.refresh.revoke(&refresh).await.unwrap();

    assert!(h.session.validate(&session.details.token).is_ok());
}

#[test]
fn test_rsa_signed_session_claims_are_rejected() {
    let h = Harness::new();
    let issued = h.session.create(42, "a@b.c", "alice", "Alice").unwrap();
    let claims: SessionClaims = session_signer().verify(&issued.details.token).unwrap();
    let rsa_token = access_signer().sign(&claims).unwrap();

    assert_eq!(
        h.session.validate(&rsa_token),
        Err(TokenError::UnsupportedAlgorithm)
    );
}

#[test]
fn test_session_token_seconds_past_expiry_is_rejected() {
    let h = Harness::new();
    let claims = SessionClaims {
        base: Claims::new(42, "stale", Utc::now() - Duration::seconds(10), Duration::seconds(5)),
        email: "a@b.c".to_string(),
        username: "alice".to_string(),
        name: "Alice".to_string(),
    };
    let token = session_signer().sign(&claims).unwrap();

    assert_eq!(h.session.validate(&token), Err(TokenError::Expired));
}
