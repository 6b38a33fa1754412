//! Common test utilities for listing API testing.
//!
//! - [`harness`] - Test server construction and seeding
//! - [`assertions`] - HTTP response assertions

pub mod assertions;
pub mod harness;
