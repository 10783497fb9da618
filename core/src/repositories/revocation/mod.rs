pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::{CacheOp, RevocationIndex};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockRevocationIndex;

#[cfg(test)]
mod tests;
