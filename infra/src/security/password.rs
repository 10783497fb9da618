//! bcrypt implementation of the PasswordHasher port

use ta_core::errors::DomainError;
use ta_core::services::auth::PasswordHasher;

/// bcrypt hasher with a configurable work factor
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` must lie in bcrypt's 4..=31 range
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !(4..=31).contains(&cost) {
            return Err(DomainError::Validation {
                message: format!("bcrypt cost {} out of range 4..=31", cost),
            });
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("bcrypt hash failed: {}", e),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
            message: format!("bcrypt verify failed: {}", e),
        })
    }
}
