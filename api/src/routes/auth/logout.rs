use actix_web::{web, HttpResponse};

use crate::dto::LogoutRequestDto;
use crate::handlers::handle_status;

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Ends the session behind the refresh token. Afterwards neither the refresh
/// token nor any access token of the session validates.
///
/// ## Errors
/// - 401 Unauthorized: Invalid or already logged-out refresh token
/// - 500 Internal Server Error: Cache failure
pub async fn logout<U, R, I, H>(
    state: web::Data<AppState<U, R, I, H>>,
    request: web::Json<LogoutRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    match state.auth_service.logout(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(status) => handle_status(&status),
    }
}
