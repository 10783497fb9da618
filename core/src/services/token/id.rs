//! Token identifier generation

use uuid::Uuid;

/// Produces unique, time-ordered identifiers for `jti` values
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUIDv7 generator.
///
/// The millisecond timestamp sits in the leading bits, so the hex rendering
/// sorts lexicographically in creation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIdGenerator;

impl IdGenerator for TimeOrderedIdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}
