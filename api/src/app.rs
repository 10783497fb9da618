//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`]; `main` and the
//! integration tests share it.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::json_error_handler;
use crate::middleware::{RequireAuth, TokenValidator};
use crate::routes::auth::{login, logout, me, refresh, register, validate, AppState};

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

/// Create and configure the application with all dependencies
pub fn create_app<U, R, I, H>(
    app_state: web::Data<AppState<U, R, I, H>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    let validator: Arc<dyn TokenValidator> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, R, I, H>))
                    .route("/login", web::post().to(login::<U, R, I, H>))
                    .route("/refresh", web::post().to(refresh::<U, R, I, H>))
                    .route("/logout", web::post().to(logout::<U, R, I, H>))
                    .route("/validate", web::post().to(validate::<U, R, I, H>))
                    .service(
                        web::resource("/me")
                            .wrap(RequireAuth::new(validator))
                            .route(web::get().to(me)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "todoapp-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
