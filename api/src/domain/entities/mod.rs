//! Domain entities
//!
//! Pure domain models for requests, their funds and their claims.

pub mod claim;
pub mod funds;
pub mod platform_issue;
pub mod profile;
pub mod request;
pub mod token;

pub use claim::{
    Claim, ClaimRequest, ClaimRequestId, ClaimsByTransactionAggregate, NewClaimRequest,
    UserClaimable,
};
pub use funds::{
    AllFunds, FundsByFunder, FundsForRequest, PendingFund, RefundRequest, RefundStatus,
};
pub use platform_issue::{Comment, PlatformIssue, PlatformIssueStatus};
pub use profile::UserProfile;
pub use request::{
    github_platform_id, github_platform_id_from_url, parse_github_platform_id, IssueInformation,
    Platform, Request, RequestId, RequestPhase, Statistics,
};
pub use token::{TokenValue, FND_SYMBOL};
