//! Access token issuance and validation

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::token::{access_key, refresh_key, AccessTokenDetails, Claims, TokenDetails};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RevocationIndex;

use super::config::TokenServiceConfig;
use super::signer::{Rs256Signer, TokenSigner};

/// Owns the access token lifecycle.
///
/// An access token never gets a fresh identifier after login: every
/// rotation re-signs the `jti` that was paired with the refresh token.
pub struct AccessTokenIssuer<I, S = Rs256Signer>
where
    I: RevocationIndex,
    S: TokenSigner,
{
    signer: Arc<S>,
    index: Arc<I>,
    config: TokenServiceConfig,
}

impl<I, S> AccessTokenIssuer<I, S>
where
    I: RevocationIndex,
    S: TokenSigner,
{
    pub fn new(signer: Arc<S>, index: Arc<I>, config: TokenServiceConfig) -> Self {
        Self {
            signer,
            index,
            config,
        }
    }

    /// Issue an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - Subject
    /// * `refresh_jti` - Identifier of the refresh token this access token hangs off
    /// * `paired_jti` - At login, the identifier reserved by the refresh issuer.
    ///   Its cache entry is written in the refresh issuer's batch, so nothing
    ///   is read or written here. `None` means rotation.
    ///
    /// On rotation the paired identifier is read from `refresh:{refresh_jti}`
    /// and `access:{jti}` is re-armed to the full access lifetime, but only
    /// while the refresh entry is still live.
    ///
    /// # Returns
    ///
    /// * `Ok(AccessTokenDetails)` - Signed token
    /// * `Err(TokenError::RefreshNotFound)` - Refresh mapping gone
    /// * `Err(DomainError::Persistence)` - Index unavailable
    pub async fn create(
        &self,
        user_id: i64,
        refresh_jti: &str,
        paired_jti: Option<&str>,
    ) -> DomainResult<AccessTokenDetails> {
        if let Some(jti) = paired_jti {
            return Ok(self.sign(user_id, jti)?);
        }

        let anchor = refresh_key(refresh_jti);
        let jti = self
            .index
            .get(&anchor)
            .await?
            .filter(|value| !value.is_empty())
            .ok_or(TokenError::RefreshNotFound)?;

        let issued = self.sign(user_id, &jti)?;

        let rearmed = self
            .index
            .set_while_live(
                &anchor,
                &access_key(&jti),
                &user_id.to_string(),
                self.config.access_ttl(),
            )
            .await?;
        if !rearmed {
            debug!(user_id, "Refresh mapping vanished during rotation");
            return Err(TokenError::RefreshNotFound.into());
        }

        Ok(issued)
    }

    /// Verify an access token and require a live `access:{jti}` entry
    /// holding the same subject
    pub async fn validate(&self, token: &str) -> DomainResult<AccessTokenDetails> {
        let claims: Claims = self.signer.verify(token)?;

        let subject = self
            .index
            .get(&access_key(&claims.jti))
            .await?
            .ok_or(TokenError::Revoked)?;

        if subject != claims.sub.to_string() {
            warn!(jti = %claims.jti, "Access mapping subject does not match token");
            return Err(TokenError::Revoked.into());
        }

        Ok(AccessTokenDetails {
            details: TokenDetails::from_claims(token.to_string(), &claims),
        })
    }

    fn sign(&self, user_id: i64, jti: &str) -> Result<AccessTokenDetails, TokenError> {
        let claims = Claims::new(user_id, jti, Utc::now(), self.config.access_lifetime);
        let token = self.signer.sign(&claims)?;
        Ok(AccessTokenDetails {
            details: TokenDetails::from_claims(token, &claims),
        })
    }
}
