pub mod revocation;
pub mod session;
pub mod user;

pub use revocation::{CacheOp, RevocationIndex};
pub use session::SessionRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use revocation::MockRevocationIndex;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use user::MockUserRepository;
