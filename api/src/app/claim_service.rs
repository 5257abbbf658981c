//! Claim service
//!
//! Claimed funds of a request and recording requests to claim.

use std::sync::Arc;

use crate::domain::entities::{
    ClaimRequest, ClaimsByTransactionAggregate, NewClaimRequest, RequestId, UserProfile,
};
use crate::domain::ports::{ClaimRepository, RequestRepository};
use crate::error::AppError;

/// Result of asking to claim a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The claim was recorded and waits for approval
    Requested(ClaimRequest),
    /// The user has no ether address to pay out to
    MissingEtherAddress,
}

/// Service for claims
pub struct ClaimService<CR, RR>
where
    CR: ClaimRepository + ?Sized,
    RR: RequestRepository + ?Sized,
{
    claims: Arc<CR>,
    requests: Arc<RR>,
}

impl<CR, RR> ClaimService<CR, RR>
where
    CR: ClaimRepository + ?Sized,
    RR: RequestRepository + ?Sized,
{
    pub fn new(claims: Arc<CR>, requests: Arc<RR>) -> Self {
        Self { claims, requests }
    }

    /// Settled claims on a request grouped by transaction
    pub async fn aggregated_claims_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<ClaimsByTransactionAggregate, AppError> {
        let claims = self.claims.find_claims(request_id).await?;
        Ok(ClaimsByTransactionAggregate::from_claims(claims)?)
    }

    /// Ask for the funds of a request to be paid out to the user.
    ///
    /// The profile is checked before the request is looked up.
    pub async fn request_claim(
        &self,
        user: &UserProfile,
        request_id: &RequestId,
    ) -> Result<ClaimOutcome, AppError> {
        let Some(address) = user.ether_address() else {
            tracing::debug!(user = %user.email, "Claim refused, no ether address");
            return Ok(ClaimOutcome::MissingEtherAddress);
        };

        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        let claim_request = self
            .claims
            .create_claim_request(&NewClaimRequest {
                request_id: request.id,
                platform: request.issue_information.platform,
                platform_id: request.issue_information.platform_id.clone(),
                address: address.to_string(),
                requested_by: user.email.clone(),
            })
            .await?;

        tracing::info!(
            request_id = %request_id,
            user = %user.email,
            address = %claim_request.address,
            "Claim requested"
        );

        Ok(ClaimOutcome::Requested(claim_request))
    }
}
