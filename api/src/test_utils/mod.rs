//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Repositories are exercised through the in-memory adapters, so only the
//! outbound HTTP ports (fiat prices, GitHub) need mocks here.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
