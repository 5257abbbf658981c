//! In-memory adapter for ClaimRepository

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Claim, ClaimRequest, ClaimRequestId, NewClaimRequest, RequestId};
use crate::domain::ports::ClaimRepository;
use crate::error::DomainError;

/// In-memory implementation of ClaimRepository
#[derive(Default)]
pub struct InMemoryClaimRepository {
    claims: RwLock<Vec<Claim>>,
    claim_requests: RwLock<Vec<ClaimRequest>>,
}

impl InMemoryClaimRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.get_mut().push(claim);
        self
    }
}

#[async_trait]
impl ClaimRepository for InMemoryClaimRepository {
    async fn find_claims(&self, request_id: &RequestId) -> Result<Vec<Claim>, DomainError> {
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| c.request_id == *request_id)
            .cloned()
            .collect())
    }

    async fn create_claim_request(
        &self,
        claim_request: &NewClaimRequest,
    ) -> Result<ClaimRequest, DomainError> {
        let created = ClaimRequest {
            id: ClaimRequestId(Uuid::new_v4()),
            request_id: claim_request.request_id,
            platform: claim_request.platform,
            platform_id: claim_request.platform_id.clone(),
            address: claim_request.address.clone(),
            requested_by: claim_request.requested_by.clone(),
            requested_at: Utc::now(),
        };
        self.claim_requests.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_claim_requests(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<ClaimRequest>, DomainError> {
        Ok(self
            .claim_requests
            .read()
            .await
            .iter()
            .filter(|c| c.request_id == *request_id)
            .cloned()
            .collect())
    }
}
