//! Authentication facade over the account store and the token issuers

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::user::{NewUser, User};
use crate::domain::entities::{RefreshTokenDetails, TokenSet};
use crate::domain::value_objects::{
    LoginIdentifier, LoginRequest, LoginResponse, LogoutResponse, RefreshResponse,
    RegisterRequest, RegisterResponse, ValidateResponse,
};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationIndex, SessionRepository, UserRepository};
use crate::services::token::{AccessTokenIssuer, RefreshTokenIssuer, SessionTokenIssuer};

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;
use super::status::Status;

const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const INVALID_ACCESS_TOKEN: &str = "Invalid access token";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Authentication service for the register / login / refresh / logout / validate flow
///
/// Every operation runs under `config.request_timeout` and reports failures
/// as a [`Status`].
pub struct AuthService<U, R, I, H>
where
    U: UserRepository,
    R: SessionRepository,
    I: RevocationIndex,
    H: PasswordHasher,
{
    /// Account store
    users: Arc<U>,
    /// Password hashing, run on the blocking pool
    hasher: Arc<H>,
    refresh_tokens: Arc<RefreshTokenIssuer<R, I>>,
    access_tokens: Arc<AccessTokenIssuer<I>>,
    session_tokens: Arc<SessionTokenIssuer>,
    config: AuthServiceConfig,
}

impl<U, R, I, H> AuthService<U, R, I, H>
where
    U: UserRepository,
    R: SessionRepository,
    I: RevocationIndex,
    H: PasswordHasher,
{
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        refresh_tokens: Arc<RefreshTokenIssuer<R, I>>,
        access_tokens: Arc<AccessTokenIssuer<I>>,
        session_tokens: Arc<SessionTokenIssuer>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            refresh_tokens,
            access_tokens,
            session_tokens,
            config,
        }
    }

    /// Create an account
    ///
    /// # Returns
    ///
    /// * `Ok(RegisterResponse)` - Account stored
    /// * `Err(Status)` - `InvalidArgument` for blank fields, `AlreadyExists`
    ///   when the email or username is taken, `Internal` otherwise
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, Status> {
        self.with_deadline("register", self.do_register(request))
            .await
    }

    async fn do_register(&self, request: RegisterRequest) -> Result<RegisterResponse, Status> {
        let RegisterRequest {
            email,
            username,
            name,
            password,
        } = request;

        if [&email, &username, &name, &password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(Status::invalid_argument(
                "email, username, name and password are required",
            ));
        }

        let password_hash = self.hash_password(password).await.map_err(|e| {
            error!("Failed to hash the password: {}", e);
            Status::internal("Failed to hash the password")
        })?;

        match self
            .users
            .create(NewUser::new(email, username, name, password_hash))
            .await
        {
            Ok(user) => {
                info!(user_id = user.id, "User registered");
                Ok(RegisterResponse::ok("User registered successfully"))
            }
            Err(DomainError::AlreadyExists { .. })
            | Err(DomainError::Auth(AuthError::UserAlreadyExists)) => {
                debug!("Registration rejected, account already exists");
                Err(Status::from(AuthError::UserAlreadyExists))
            }
            Err(e) => {
                error!("Failed to create user: {}", e);
                Err(Status::internal(INTERNAL_SERVER_ERROR))
            }
        }
    }

    /// Authenticate by email or username and issue a fresh token set
    ///
    /// Exactly one identifier must be supplied. A wrong password leaves no
    /// session row and no cache entries behind.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, Status> {
        self.with_deadline("login", self.do_login(request)).await
    }

    async fn do_login(&self, request: LoginRequest) -> Result<LoginResponse, Status> {
        let user = match request.identifier() {
            Some(identifier) => self.find_user(identifier).await?,
            None => {
                let both = request.email.as_deref().is_some_and(|v| !v.trim().is_empty())
                    && request.username.as_deref().is_some_and(|v| !v.trim().is_empty());
                return Err(if both {
                    Status::invalid_argument("provide either the username or the email, not both")
                } else {
                    Status::from(AuthError::MissingLoginIdentifier)
                });
            }
        };

        let matches = self
            .verify_password(request.password, user.password_hash.clone())
            .await
            .map_err(|e| {
                error!(user_id = user.id, "Password check failed: {}", e);
                Status::internal(INTERNAL_SERVER_ERROR)
            })?;
        if !matches {
            debug!(user_id = user.id, "Login rejected, wrong password");
            return Err(Status::from(AuthError::InvalidCredentials));
        }

        let token_set = self.issue_token_set(&user).await?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            success: true,
            message: "User logged in successfully".to_string(),
            token_set,
        })
    }

    async fn find_user(&self, identifier: LoginIdentifier<'_>) -> Result<User, Status> {
        let found = match identifier {
            LoginIdentifier::Email(email) => self.users.find_by_email(email).await,
            LoginIdentifier::Username(username) => self.users.find_by_username(username).await,
        };

        match found {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Status::from(AuthError::UserNotFound)),
            Err(e) => {
                error!("User lookup failed: {}", e);
                Err(Status::internal(INTERNAL_SERVER_ERROR))
            }
        }
    }

    async fn issue_token_set(&self, user: &User) -> Result<TokenSet, Status> {
        let refresh = self.refresh_tokens.create(user.id).await.map_err(|e| {
            error!(user_id = user.id, "Failed to create refresh token: {}", e);
            Status::internal("Failed to create refresh token")
        })?;

        let access = match self
            .access_tokens
            .create(user.id, &refresh.details.jti, Some(&refresh.access_jti))
            .await
        {
            Ok(access) => access,
            Err(e) => {
                error!(user_id = user.id, "Failed to create access token: {}", e);
                self.abandon_session(&refresh).await;
                return Err(Status::internal("Failed to create access token"));
            }
        };

        let session = match self
            .session_tokens
            .create(user.id, &user.email, &user.username, &user.name)
        {
            Ok(session) => session,
            Err(e) => {
                error!(user_id = user.id, "Failed to create session token: {}", e);
                self.abandon_session(&refresh).await;
                return Err(Status::internal("Failed to create session token"));
            }
        };

        Ok(TokenSet {
            access: access.details.token,
            refresh: refresh.details.token,
            session: session.details.token,
        })
    }

    /// Revoke a half-issued login so its refresh token never reaches anyone
    async fn abandon_session(&self, refresh: &RefreshTokenDetails) {
        if let Err(e) = self.refresh_tokens.revoke(refresh).await {
            warn!(
                "Could not revoke abandoned session {}: {}",
                refresh.details.jti, e
            );
        }
    }

    /// Re-sign the access token paired with a refresh token
    ///
    /// The returned access token always carries the same `jti`; its cache
    /// mapping TTL is re-armed.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, Status> {
        self.with_deadline("refresh", self.do_refresh(refresh_token))
            .await
    }

    async fn do_refresh(&self, refresh_token: &str) -> Result<RefreshResponse, Status> {
        let refresh = self
            .refresh_tokens
            .validate(refresh_token)
            .await
            .map_err(|e| Self::reject("refresh", &e, INVALID_REFRESH_TOKEN, INTERNAL_SERVER_ERROR))?;

        let access = self
            .access_tokens
            .create(refresh.details.user_id, &refresh.details.jti, None)
            .await
            .map_err(|e| {
                Self::reject(
                    "refresh",
                    &e,
                    INVALID_REFRESH_TOKEN,
                    "Failed to create access token",
                )
            })?;

        debug!(user_id = refresh.details.user_id, "Access token rotated");

        Ok(RefreshResponse {
            success: true,
            message: "Access token refreshed successfully".to_string(),
            access_token: access.details.token,
        })
    }

    /// End the session behind a refresh token
    ///
    /// Both cache mappings are removed in one batch; the session row is
    /// stamped as logged out on a best-effort basis.
    pub async fn logout(&self, refresh_token: &str) -> Result<LogoutResponse, Status> {
        self.with_deadline("logout", self.do_logout(refresh_token))
            .await
    }

    async fn do_logout(&self, refresh_token: &str) -> Result<LogoutResponse, Status> {
        let refresh = self
            .refresh_tokens
            .validate(refresh_token)
            .await
            .map_err(|e| Self::reject("logout", &e, INVALID_REFRESH_TOKEN, INTERNAL_SERVER_ERROR))?;

        self.refresh_tokens
            .revoke(&refresh)
            .await
            .map_err(|e| Self::reject("logout", &e, INVALID_REFRESH_TOKEN, "Failed to delete tokens"))?;

        Ok(LogoutResponse::ok("User logged out successfully"))
    }

    /// Check an access token and report its subject
    pub async fn validate(&self, access_token: &str) -> Result<ValidateResponse, Status> {
        self.with_deadline("validate", async {
            self.access_tokens
                .validate(access_token)
                .await
                .map(|access| ValidateResponse::valid(access.details.user_id))
                .map_err(|e| {
                    Self::reject("validate", &e, INVALID_ACCESS_TOKEN, INTERNAL_SERVER_ERROR)
                })
        })
        .await
    }

    fn reject(
        operation: &'static str,
        err: &DomainError,
        credential_message: &str,
        internal_message: &str,
    ) -> Status {
        if err.is_credential_failure() {
            debug!(operation, "Credential rejected: {}", err);
        } else {
            error!(operation, "Operation failed: {}", err);
        }
        Status::from_domain(err, credential_message, internal_message)
    }

    async fn with_deadline<T, F>(&self, operation: &'static str, fut: F) -> Result<T, Status>
    where
        F: Future<Output = Result<T, Status>>,
    {
        match tokio::time::timeout(self.config.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "Request deadline exceeded"
                );
                Err(Status::from(AuthError::DeadlineExceeded))
            }
        }
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
    }

    async fn verify_password(&self, password: String, hash: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
    }
}
