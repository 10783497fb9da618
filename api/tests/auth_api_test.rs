//! End-to-end tests for the `/api/v1/auth` endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ta_api::app::create_app;
use ta_api::dto::ErrorResponse;
use ta_core::services::auth::Code;

macro_rules! post {
    ($app:expr, $path:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($path)
            .set_json($body)
            .to_request();
        test::call_service($app, req).await
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_full_token_lifecycle() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let resp = post!(&app, "/api/v1/auth/register", common::alice());
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");

    let resp = post!(
        &app,
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "P@ssw0rd1" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let access = body["token_set"]["access"].as_str().unwrap().to_string();
    let refresh = body["token_set"]["refresh"].as_str().unwrap().to_string();
    assert!(body["token_set"]["session"].as_str().is_some());

    let resp = post!(&app, "/api/v1/auth/validate", json!({ "access_token": access }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_valid"], true);
    let user_id = body["user_id"].as_str().unwrap().to_string();

    let resp = post!(&app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rotated = body["access_token"].as_str().unwrap().to_string();

    let resp = post!(&app, "/api/v1/auth/validate", json!({ "access_token": rotated }));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"].as_str(), Some(user_id.as_str()));

    let resp = post!(&app, "/api/v1/auth/logout", json!({ "refresh_token": refresh }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User logged out successfully");

    for token in [&access, &rotated] {
        let resp = post!(&app, "/api/v1/auth/validate", json!({ "access_token": token }));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let resp = post!(&app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh }));
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, Code::Unauthenticated);
    assert_eq!(body.message, "Invalid refresh token");
}

#[actix_web::test]
async fn test_register_rejects_invalid_body() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let resp = post!(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "not-an-email",
            "username": "alice",
            "name": "Alice Liddell",
            "password": "short"
        })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.code, Code::InvalidArgument);
    assert_eq!(body.message, "Invalid request body: email, password");
}

#[actix_web::test]
async fn test_malformed_json_gets_json_error() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, Code::InvalidArgument);
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let resp = post!(&app, "/api/v1/auth/register", common::alice());
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = post!(&app, "/api/v1/auth/register", common::alice());
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, Code::AlreadyExists);
}

#[actix_web::test]
async fn test_login_failures() {
    let app = test::init_service(create_app(common::app_state().await)).await;
    post!(&app, "/api/v1/auth/register", common::alice());

    let resp = post!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "alice@example.com", "password": "wrong-password" })
    );
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "bob@example.com", "password": "P@ssw0rd1" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post!(&app, "/api/v1/auth/login", json!({ "password": "P@ssw0rd1" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "alice@example.com", "username": "alice", "password": "P@ssw0rd1" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body.message,
        "provide either the username or the email, not both"
    );
}

#[actix_web::test]
async fn test_validate_rejects_refresh_token() {
    let app = test::init_service(create_app(common::app_state().await)).await;
    post!(&app, "/api/v1/auth/register", common::alice());

    let resp = post!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "alice@example.com", "password": "P@ssw0rd1" })
    );
    let body: Value = test::read_body_json(resp).await;
    let refresh = body["token_set"]["refresh"].as_str().unwrap().to_string();

    let resp = post!(&app, "/api/v1/auth/validate", json!({ "access_token": refresh }));
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid access token");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let app = test::init_service(create_app(common::app_state().await)).await;

    let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
