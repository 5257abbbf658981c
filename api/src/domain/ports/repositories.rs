//! Repository port traits
//!
//! These traits define the interface for data access.
//! Implementations are provided by adapters (e.g., the in-memory store).

use async_trait::async_trait;

use crate::domain::entities::{
    Claim, ClaimRequest, FundsByFunder, NewClaimRequest, PendingFund, Platform, RefundRequest,
    RefundStatus, Request, RequestId, UserProfile,
};
use crate::error::DomainError;

/// Repository for Request entities
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// All requests, ordered by id
    async fn find_all(&self) -> Result<Vec<Request>, DomainError>;

    /// Find a request by ID
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<Request>, DomainError>;

    /// Find a request by the platform coordinates of its issue
    async fn find_by_platform_id(
        &self,
        platform: Platform,
        platform_id: &str,
    ) -> Result<Option<Request>, DomainError>;

    /// Requests a user is watching
    async fn find_watched_by(&self, user: &str) -> Result<Vec<Request>, DomainError>;

    /// Add or remove `user` as a watcher in one atomic step.
    ///
    /// Returns the updated request and whether the user now watches it.
    async fn toggle_watcher(
        &self,
        id: &RequestId,
        user: &str,
    ) -> Result<(Request, bool), DomainError>;
}

/// Repository for funds, pending funds and refunds
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Confirmed funds on a request, one entry per funder
    async fn find_by_request_grouped_by_funder(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<FundsByFunder>, DomainError>;

    /// Unconfirmed funds submitted by a user
    async fn find_pending_by_user(&self, user: &str) -> Result<Vec<PendingFund>, DomainError>;

    /// Refund requests on a request having one of the given statuses
    async fn find_refund_requests(
        &self,
        request_id: &RequestId,
        statuses: &[RefundStatus],
    ) -> Result<Vec<RefundRequest>, DomainError>;
}

/// Repository for claims and claim requests
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Settled claims on a request
    async fn find_claims(&self, request_id: &RequestId) -> Result<Vec<Claim>, DomainError>;

    /// Record a new claim request
    async fn create_claim_request(
        &self,
        claim_request: &NewClaimRequest,
    ) -> Result<ClaimRequest, DomainError>;

    /// Claim requests recorded for a request
    async fn find_claim_requests(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<ClaimRequest>, DomainError>;
}

/// Repository for user profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a user by the hash of their API key
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<UserProfile>, DomainError>;
}
