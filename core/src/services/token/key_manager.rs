//! RS256 key management for JWT signing and verification

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Decoded RSA key pair for one token kind.
///
/// Refresh and access tokens each get their own manager so that a leaked
/// access key cannot forge refresh tokens.
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Human-readable label for logs
    label: &'static str,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Rs256KeyManager {
    /// Creates a key manager from base64-encoded PEM material, the form the
    /// keys take in the environment
    ///
    /// # Arguments
    ///
    /// * `label` - Which token kind the keys belong to, for logs
    /// * `private_key_b64` - Base64 of a PEM-encoded RSA private key
    /// * `public_key_b64` - Base64 of a PEM-encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Keys decoded
    /// * `Err(TokenError::KeyDecode)` - Bad base64 or invalid PEM
    pub fn from_base64_pem(
        label: &'static str,
        private_key_b64: &str,
        public_key_b64: &str,
    ) -> Result<Self, TokenError> {
        let private_pem = decode_base64(label, "private", private_key_b64)?;
        let public_pem = decode_base64(label, "public", public_key_b64)?;
        Self::from_pem_bytes(label, &private_pem, &public_pem)
    }

    /// Creates a key manager from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        label: &'static str,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, TokenError> {
        Self::from_pem_bytes(label, private_key_pem.as_bytes(), public_key_pem.as_bytes())
    }

    fn from_pem_bytes(
        label: &'static str,
        private_key_pem: &[u8],
        public_key_pem: &[u8],
    ) -> Result<Self, TokenError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| TokenError::KeyDecode {
                message: format!("invalid {} private key: {}", label, e),
            })?;

        let decoding_key =
            DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| TokenError::KeyDecode {
                message: format!("invalid {} public key: {}", label, e),
            })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            label,
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

fn decode_base64(label: &str, part: &str, encoded: &str) -> Result<Vec<u8>, TokenError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| TokenError::KeyDecode {
        message: format!("{} {} key is not valid base64: {}", label, part, e),
    })
}
