//! GitHub adapter
//!
//! Implementation of the GitHub client port over the REST API.

pub mod client;

pub use client::GithubClientImpl;
