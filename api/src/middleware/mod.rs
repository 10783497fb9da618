pub mod auth;

pub use auth::{AuthContext, RequireAuth, TokenValidator};
