//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod fiat;
pub mod github;
pub mod memory;

pub use fiat::CryptoCompareClient;
pub use github::GithubClientImpl;
pub use memory::{InMemoryStore, SeedData};
