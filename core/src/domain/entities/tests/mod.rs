//! Unit tests for domain entities

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::{
    access_key, refresh_key, Claims, NewUser, Session, SessionClaims,
};

#[test]
fn test_claims_nbf_equals_iat() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let claims = Claims::new(42, "01J0000000", now, Duration::minutes(15));

    assert_eq!(claims.sub, 42);
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.nbf, claims.iat);
    assert_eq!(claims.exp, claims.iat + 900);
}

#[test]
fn test_claims_serialize_numeric_subject() {
    let claims = Claims::new(7, "jti", Utc::now(), Duration::seconds(60));
    let json = serde_json::to_value(&claims).unwrap();

    assert!(json["sub"].is_i64());
    assert_eq!(json["sub"], 7);
}

#[test]
fn test_claims_reject_string_subject() {
    let raw = r#"{"sub":"alice","jti":"x","iat":1,"nbf":1,"exp":2}"#;
    assert!(serde_json::from_str::<Claims>(raw).is_err());
}

#[test]
fn test_session_claims_flatten_base_claims() {
    let claims = SessionClaims {
        base: Claims::new(42, "sess", Utc::now(), Duration::hours(1)),
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        name: "Alice".to_string(),
    };
    let json = serde_json::to_value(&claims).unwrap();

    assert_eq!(json["sub"], 42);
    assert_eq!(json["username"], "alice");
    assert!(json.get("base").is_none());
}

#[test]
fn test_cache_keys() {
    assert_eq!(refresh_key("abc"), "refresh:abc");
    assert_eq!(access_key("abc"), "access:abc");
}

#[test]
fn test_session_expiry() {
    let login_at = Utc::now();
    let session = Session::new("id", 1, login_at, (login_at + Duration::days(1)).timestamp());

    assert!(session.logged_out_at.is_none());
    assert!(!session.is_expired_at(login_at));
    assert!(session.is_expired_at(login_at + Duration::days(2)));
}

#[test]
fn test_user_debug_hides_password_hash() {
    let user = NewUser::new("a@b.c", "alice", "Alice", "$2b$04$secret").into_user(42, Utc::now());
    let rendered = format!("{:?}", user);

    assert_eq!(user.id, 42);
    assert!(!rendered.contains("$2b$04$secret"));
    assert!(serde_json::to_value(&user).unwrap().get("password_hash").is_none());
}
