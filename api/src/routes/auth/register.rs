use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::RegisterRequestDto;
use crate::handlers::{handle_status, handle_validation_errors};

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "username": "alice",
///     "name": "Alice Liddell",
///     "password": "P@ssw0rd1"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "success": true, "message": "User registered successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: A field failed validation
/// - 409 Conflict: Email or username already taken
/// - 500 Internal Server Error: Hashing or storage failure
pub async fn register<U, R, I, H>(
    state: web::Data<AppState<U, R, I, H>>,
    request: web::Json<RegisterRequestDto>,
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

    match state.auth_service.register(request.into()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(status) => handle_status(&status),
    }
}
