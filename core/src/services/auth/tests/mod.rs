//! Tests for the authentication facade
