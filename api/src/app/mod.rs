//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod claim_service;
pub mod fiat_service;
pub mod fund_service;
pub mod platform_issue_service;
pub mod profile_service;
pub mod request_service;

pub use claim_service::{ClaimOutcome, ClaimService};
pub use fiat_service::FiatService;
pub use fund_service::FundService;
pub use platform_issue_service::PlatformIssueService;
pub use profile_service::{hash_api_key, ProfileService};
pub use request_service::RequestService;
