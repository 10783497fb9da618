//! Tests for the token lifecycle


mod session_tests;
