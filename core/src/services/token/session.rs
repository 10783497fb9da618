//! Session token: a signed, client-readable profile snapshot.
//!
//! Session tokens are not tracked in the revocation index and stay valid
//! until `exp` even after logout. They must never be used for
//! authorization decisions; the access token is the credential.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::token::{Claims, SessionClaims, SessionTokenDetails, TokenDetails};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;
use super::id::IdGenerator;
use super::signer::{Hs256Signer, TokenSigner};

pub struct SessionTokenIssuer<S = Hs256Signer>
where
    S: TokenSigner,
{
    signer: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    config: TokenServiceConfig,
}

impl<S: TokenSigner> SessionTokenIssuer<S> {
    pub fn new(signer: Arc<S>, ids: Arc<dyn IdGenerator>, config: TokenServiceConfig) -> Self {
        Self {
            signer,
            ids,
            config,
        }
    }

    pub fn create(
        &self,
        user_id: i64,
        email: &str,
        username: &str,
        name: &str,
    ) -> Result<SessionTokenDetails, TokenError> {
        let claims = SessionClaims {
            base: Claims::new(user_id, self.ids.generate(), Utc::now(), self.config.session_lifetime),
            email: email.to_string(),
            username: username.to_string(),
            name: name.to_string(),
        };
        let token = self.signer.sign(&claims)?;
        Ok(Self::details(token, claims))
    }

    /// Signature and claim checks only; there is no revocation lookup
    pub fn validate(&self, token: &str) -> Result<SessionTokenDetails, TokenError> {
        let claims: SessionClaims = self.signer.verify(token)?;
        Ok(Self::details(token.to_string(), claims))
    }

    fn details(token: String, claims: SessionClaims) -> SessionTokenDetails {
        SessionTokenDetails {
            details: TokenDetails::from_claims(token, &claims.base),
            email: claims.email,
            username: claims.username,
            name: claims.name,
        }
    }
}
