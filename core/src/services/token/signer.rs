//! Signing and verification capability for the three token kinds.
//!
//! Refresh and access tokens are signed with RSA; the session token is
//! signed with an HMAC secret. Each signer only accepts tokens whose header
//! algorithm belongs to its own family.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::TokenError;

use super::key_manager::Rs256KeyManager;

const RSA_FAMILY: &[Algorithm] = &[Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
const HMAC_FAMILY: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Sign claims into a compact JWT and verify them back
pub trait TokenSigner: Send + Sync {
    /// Serialize and sign a claim set
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError>;

    /// Check algorithm family, signature, `exp`/`nbf`, then decode the claims
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Header algorithm outside this signer's family
    /// * `InvalidSignature` - Malformed token or signature mismatch
    /// * `Expired` - `exp` has passed
    /// * `InvalidClaims` - Claims do not decode into `C` (e.g. non-numeric `sub`)
    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError>;
}

/// RS256 signer backed by one RSA key pair
#[derive(Debug, Clone)]
pub struct Rs256Signer {
    keys: Rs256KeyManager,
    validation: Validation,
}

impl Rs256Signer {
    pub fn new(keys: Rs256KeyManager) -> Self {
        Self {
            keys,
            validation: family_validation(Algorithm::RS256, RSA_FAMILY),
        }
    }
}

impl TokenSigner for Rs256Signer {
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode_jwt(Algorithm::RS256, claims, self.keys.encoding_key())
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode_jwt(token, self.keys.decoding_key(), &self.validation, RSA_FAMILY).map_err(|e| {
            debug!(keys = self.keys.label(), "RS256 verification failed: {}", e);
            e
        })
    }
}

/// HS256 signer backed by a shared secret
#[derive(Clone)]
pub struct Hs256Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for Hs256Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256Signer").finish_non_exhaustive()
    }
}

impl Hs256Signer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: family_validation(Algorithm::HS256, HMAC_FAMILY),
        }
    }
}

impl TokenSigner for Hs256Signer {
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode_jwt(Algorithm::HS256, claims, &self.encoding_key)
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode_jwt(token, &self.decoding_key, &self.validation, HMAC_FAMILY)
    }
}

fn family_validation(primary: Algorithm, family: &[Algorithm]) -> Validation {
    let mut validation = Validation::new(primary);
    validation.algorithms = family.to_vec();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "nbf"]);
    validation
}

fn encode_jwt<C: Serialize>(
    algorithm: Algorithm,
    claims: &C,
    key: &EncodingKey,
) -> Result<String, TokenError> {
    encode(&Header::new(algorithm), claims, key).map_err(|e| TokenError::Signing {
        message: e.to_string(),
    })
}

fn decode_jwt<C: DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
    family: &[Algorithm],
) -> Result<C, TokenError> {
    let header = decode_header(token).map_err(|e| {
        debug!("Rejecting token with unreadable header: {}", e);
        TokenError::InvalidSignature
    })?;

    if !family.contains(&header.alg) {
        debug!("Rejecting token signed with {:?}", header.alg);
        return Err(TokenError::UnsupportedAlgorithm);
    }

    decode::<C>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token verification failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
                ErrorKind::Json(_)
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::ImmatureSignature => TokenError::InvalidClaims,
                ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => TokenError::KeyDecode {
                    message: e.to_string(),
                },
                _ => TokenError::InvalidSignature,
            }
        })
}
