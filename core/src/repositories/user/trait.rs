//! User repository trait defining the account store interface.
//!
//! The auth facade only needs lookups by login identifier and account
//! creation. Passwords arrive already hashed.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ta_core::repositories::UserRepository;
/// use ta_core::domain::entities::user::{NewUser, User};
/// use ta_core::errors::DomainError;
///
/// struct SqliteUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for SqliteUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_username(&self, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, _: NewUser) -> Result<User, DomainError> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Store unavailable
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Store unavailable
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new account
    ///
    /// # Arguments
    /// * `user` - Account data with the password already hashed
    ///
    /// # Returns
    /// * `Ok(User)` - The stored account with its assigned id
    /// * `Err(DomainError::AlreadyExists)` - Email or username taken
    /// * `Err(DomainError)` - Store unavailable
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}
