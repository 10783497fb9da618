//! Access token authentication middleware for protecting API endpoints.
//!
//! The middleware reads the token from the Authorization header, asks the
//! auth service to validate it, and injects the caller's identity into the
//! request. Both `Bearer <token>` and a bare token are accepted.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::{AuthService, PasswordHasher, Status};

use crate::handlers::handle_status;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the validated access token
    pub user_id: i64,
}

/// Anything that can turn an access token into a user id
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate_access_token(&self, token: &str) -> Result<i64, Status>;
}

#[async_trait]
impl<U, R, I, H> TokenValidator for AuthService<U, R, I, H>
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    async fn validate_access_token(&self, token: &str) -> Result<i64, Status> {
        let response = self.validate(token).await?;
        response.user_id.parse().map_err(|_| {
            tracing::error!("Validated token carried a non-numeric subject");
            Status::internal("Internal server error")
        })
    }
}

/// Middleware factory requiring a valid access token
#[derive(Clone)]
pub struct RequireAuth {
    validator: Arc<dyn TokenValidator>,
}

impl RequireAuth {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            validator: self.validator.clone(),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    validator: Arc<dyn TokenValidator>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = self.validator.clone();

        Box::pin(async move {
            let outcome = match extract_token(&req) {
                Some(token) => validator.validate_access_token(&token).await,
                None => Err(Status::unauthenticated("Missing Authorization header")),
            };

            match outcome {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthContext { user_id });
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(status) => {
                    let response = handle_status(&status).map_into_right_body();
                    let (request, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(request, response))
                }
            }
        })
    }
}

/// Token from the Authorization header, with or without the `Bearer ` prefix
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => value,
    };

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extractor for handlers behind [`RequireAuth`]
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as atest;

    #[test]
    fn test_extract_token() {
        let req = atest::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_token(&req), Some("test_token_123".to_string()));

        let raw = atest::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_token(&raw), Some("test_token_123".to_string()));

        let blank = atest::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_token(&blank), None);

        let missing = atest::TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&missing), None);
    }
}
