//! Refresh token issuance, validation and revocation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::session::Session;
use crate::domain::entities::token::{
    access_key, refresh_key, Claims, RefreshTokenDetails, TokenDetails,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{CacheOp, RevocationIndex, SessionRepository};

use super::config::TokenServiceConfig;
use super::id::IdGenerator;
use super::signer::{Rs256Signer, TokenSigner};

/// Owns the refresh token lifecycle.
///
/// A login is established by a durable session row keyed by the refresh
/// `jti` plus two revocation index entries written in one batch:
/// `refresh:{jti}` → paired access jti, and `access:{paired}` → user id.
pub struct RefreshTokenIssuer<R, I, S = Rs256Signer>
where
    R: SessionRepository,
    I: RevocationIndex,
    S: TokenSigner,
{
    signer: Arc<S>,
    sessions: Arc<R>,
    index: Arc<I>,
    ids: Arc<dyn IdGenerator>,
    config: TokenServiceConfig,
}

impl<R, I, S> RefreshTokenIssuer<R, I, S>
where
    R: SessionRepository,
    I: RevocationIndex,
    S: TokenSigner,
{
    pub fn new(
        signer: Arc<S>,
        sessions: Arc<R>,
        index: Arc<I>,
        ids: Arc<dyn IdGenerator>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            signer,
            sessions,
            index,
            ids,
            config,
        }
    }

    /// Issue a refresh token for `user_id` and establish its session
    ///
    /// The session row is written before the cache. On a primary-key
    /// collision the existing row is left alone; fresh identifiers are drawn
    /// and creation is retried once.
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshTokenDetails)` - Token plus the reserved access jti
    /// * `Err(TokenError::Signing)` - Key material fault
    /// * `Err(DomainError::Persistence)` - Store or cache write failed
    pub async fn create(&self, user_id: i64) -> DomainResult<RefreshTokenDetails> {
        let now = Utc::now();

        let mut issued = self.mint(user_id, now)?;
        match self.sessions.create(&self.session_row(&issued, now)).await {
            Ok(()) => {}
            Err(DomainError::AlreadyExists { .. }) => {
                warn!(
                    user_id,
                    "Session id collision on {}, retrying with fresh identifiers",
                    issued.details.jti
                );
                issued = self.mint(user_id, now)?;
                self.sessions
                    .create(&self.session_row(&issued, now))
                    .await
                    .map_err(|e| {
                        error!(user_id, "Session creation failed after retry: {}", e);
                        DomainError::persistence("failed to create session")
                    })?;
            }
            Err(e) => {
                error!(user_id, "Session creation failed: {}", e);
                return Err(DomainError::persistence("failed to create session"));
            }
        }

        let ops = [
            CacheOp::set(
                refresh_key(&issued.details.jti),
                issued.access_jti.clone(),
                self.config.refresh_ttl(),
            ),
            CacheOp::set(
                access_key(&issued.access_jti),
                user_id.to_string(),
                self.config.access_ttl(),
            ),
        ];
        if let Err(e) = self.index.exec_batch(&ops).await {
            error!(user_id, "Revocation index write failed: {}", e);
            // The row is unreachable without cache entries; drop it if we can
            if let Err(cleanup) = self.sessions.delete_by_id(&issued.details.jti).await {
                warn!("Could not remove orphaned session {}: {}", issued.details.jti, cleanup);
            }
            return Err(DomainError::persistence("failed to record session"));
        }

        debug!(user_id, jti = %issued.details.jti, "Refresh token issued");
        Ok(issued)
    }

    /// Verify a refresh token and require a live `refresh:{jti}` entry
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshTokenDetails)` - `access_jti` is read from the index
    /// * `Err(TokenError::Revoked)` - Entry absent for any reason
    /// * `Err(TokenError::*)` - Signature, algorithm, claim or expiry failure
    pub async fn validate(&self, token: &str) -> DomainResult<RefreshTokenDetails> {
        let claims: Claims = self.signer.verify(token)?;

        let paired = self
            .index
            .get(&refresh_key(&claims.jti))
            .await?
            .filter(|value| !value.is_empty())
            .ok_or(TokenError::Revoked)?;

        Ok(RefreshTokenDetails {
            details: TokenDetails::from_claims(token.to_string(), &claims),
            access_jti: paired,
        })
    }

    /// Remove both revocation entries, then stamp the session row
    ///
    /// The stamp is best-effort; the index is what makes the tokens invalid.
    pub async fn revoke(&self, refresh: &RefreshTokenDetails) -> DomainResult<()> {
        let ops = [
            CacheOp::delete(refresh_key(&refresh.details.jti)),
            CacheOp::delete(access_key(&refresh.access_jti)),
        ];
        self.index.exec_batch(&ops).await.map_err(|e| {
            error!("Revocation index delete failed: {}", e);
            DomainError::persistence("failed to revoke session")
        })?;

        match self
            .sessions
            .mark_logged_out(&refresh.details.jti, Utc::now())
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!("No session row for {}", refresh.details.jti),
            Err(e) => warn!("Could not stamp logout on {}: {}", refresh.details.jti, e),
        }

        info!(user_id = refresh.details.user_id, "Session revoked");
        Ok(())
    }

    fn mint(&self, user_id: i64, now: DateTime<Utc>) -> Result<RefreshTokenDetails, TokenError> {
        let claims = Claims::new(user_id, self.ids.generate(), now, self.config.refresh_lifetime);
        let token = self.signer.sign(&claims)?;
        Ok(RefreshTokenDetails {
            details: TokenDetails::from_claims(token, &claims),
            access_jti: self.ids.generate(),
        })
    }

    fn session_row(&self, issued: &RefreshTokenDetails, now: DateTime<Utc>) -> Session {
        Session::new(
            issued.details.jti.clone(),
            issued.details.user_id,
            now,
            issued.details.expires_at,
        )
    }
}
