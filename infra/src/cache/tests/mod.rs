//! Tests for the revocation index backends
