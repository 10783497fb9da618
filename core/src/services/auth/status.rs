//! Caller-facing status codes for the auth facade
//!
//! Every failure of a facade operation is reduced to a `Status`. Internal
//! causes are logged where they happen and never copied into the message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{AuthError, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Unauthenticated,
    DeadlineExceeded,
    Internal,
}

impl Code {
    /// HTTP status the transport layer answers with
    pub fn http_status(self) -> u16 {
        match self {
            Code::InvalidArgument => 400,
            Code::Unauthenticated => 401,
            Code::NotFound => 404,
            Code::AlreadyExists => 409,
            Code::Internal => 500,
            Code::DeadlineExceeded => 504,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(Code::Unauthenticated, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }

    /// Reduce a domain error to a caller-facing status
    ///
    /// Credential failures of any kind share `credential_message`; server-side
    /// faults share `internal_message`.
    pub fn from_domain(err: &DomainError, credential_message: &str, internal_message: &str) -> Self {
        match err {
            DomainError::Auth(auth) => auth.clone().into(),
            DomainError::Validation { message } => Self::invalid_argument(message.clone()),
            DomainError::AlreadyExists { .. } => {
                Self::new(Code::AlreadyExists, AuthError::UserAlreadyExists.to_string())
            }
            DomainError::NotFound { resource } => {
                Self::new(Code::NotFound, format!("{} not found", resource))
            }
            err if err.is_credential_failure() => Self::unauthenticated(credential_message),
            _ => Self::internal(internal_message),
        }
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        let code = match err {
            AuthError::UserNotFound => Code::NotFound,
            AuthError::UserAlreadyExists => Code::AlreadyExists,
            AuthError::InvalidCredentials => Code::Unauthenticated,
            AuthError::MissingLoginIdentifier => Code::InvalidArgument,
            AuthError::DeadlineExceeded => Code::DeadlineExceeded,
        };
        Self::new(code, err.to_string())
    }
}
