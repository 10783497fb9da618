//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_auth_error_messages_match_facade_wording() {
    assert_eq!(AuthError::UserNotFound.to_string(), "User not found");
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid password");
    assert_eq!(
        AuthError::MissingLoginIdentifier.to_string(),
        "must provide the username or email"
    );
}

#[test]
fn test_token_error_bridges_into_domain_error() {
    let error: DomainError = TokenError::Revoked.into();
    assert_eq!(error, DomainError::Token(TokenError::Revoked));
    assert_eq!(error.to_string(), "Token revoked");
}

#[test]
fn test_credential_failures_are_classified() {
    for err in [
        TokenError::InvalidSignature,
        TokenError::InvalidClaims,
        TokenError::UnsupportedAlgorithm,
        TokenError::Expired,
        TokenError::Revoked,
        TokenError::RefreshNotFound,
    ] {
        assert!(err.is_credential_failure(), "{:?}", err);
        assert!(DomainError::from(err).is_credential_failure());
    }
}

#[test]
fn test_key_and_signing_faults_are_not_credential_failures() {
    let decode = TokenError::KeyDecode {
        message: "bad base64".to_string(),
    };
    let signing = TokenError::Signing {
        message: "rsa".to_string(),
    };
    assert!(!decode.is_credential_failure());
    assert!(!signing.is_credential_failure());
    assert!(!DomainError::persistence("redis down").is_credential_failure());
}
