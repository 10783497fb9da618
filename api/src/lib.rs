//! HTTP surface of the auth service
//!
//! Exposes the register / login / refresh / logout / validate operations as
//! JSON endpoints and provides the middleware other routes use to require a
//! valid access token.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
