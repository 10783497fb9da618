use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::LoginRequestDto;
use crate::handlers::{handle_status, handle_validation_errors};

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Accepts either `email` or `username` alongside `password`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "User logged in successfully",
///     "token_set": { "access": "eyJ...", "refresh": "eyJ...", "session": "eyJ..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Neither or both identifiers, or a malformed email
/// - 401 Unauthorized: Wrong password
/// - 404 Not Found: No such account
/// - 500 Internal Server Error: Token issuance failure
pub async fn login<U, R, I, H>(
    state: web::Data<AppState<U, R, I, H>>,
    request: web::Json<LoginRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(request.into()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(status) => handle_status(&status),
    }
}
