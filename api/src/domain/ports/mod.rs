//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod fiat;
pub mod github;
pub mod repositories;

pub use fiat::FiatPriceLookup;
pub use github::{GithubClient, GithubComment, GithubIssue, GithubUser};
pub use repositories::{ClaimRepository, FundRepository, ProfileRepository, RequestRepository};
