//! Password hashing port

use crate::errors::DomainError;

/// One-way password hashing
///
/// Implementations are CPU-bound; the facade runs them on the blocking pool.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    ///
    /// `Ok(false)` means a mismatch; `Err` means the hash itself is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
