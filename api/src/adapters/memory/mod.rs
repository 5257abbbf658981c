//! In-memory adapters
//!
//! Implementations of repository traits backed by process memory,
//! seeded from a JSON document at startup.

pub mod claim_repo;
pub mod fund_repo;
pub mod profile_repo;
pub mod request_repo;
pub mod seed;

pub use claim_repo::InMemoryClaimRepository;
pub use fund_repo::InMemoryFundRepository;
pub use profile_repo::InMemoryProfileRepository;
pub use request_repo::InMemoryRequestRepository;
pub use seed::{InMemoryStore, SeedData};
