//! In-memory adapter for FundRepository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{FundsByFunder, PendingFund, RefundRequest, RefundStatus, RequestId};
use crate::domain::ports::FundRepository;
use crate::error::DomainError;

/// In-memory implementation of FundRepository
#[derive(Default)]
pub struct InMemoryFundRepository {
    funds: RwLock<HashMap<RequestId, Vec<FundsByFunder>>>,
    pending: RwLock<Vec<PendingFund>>,
    refunds: RwLock<Vec<RefundRequest>>,
}

impl InMemoryFundRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funds(mut self, request_id: RequestId, funds: Vec<FundsByFunder>) -> Self {
        self.funds.get_mut().insert(request_id, funds);
        self
    }

    pub fn with_pending_fund(mut self, pending: PendingFund) -> Self {
        self.pending.get_mut().push(pending);
        self
    }

    pub fn with_refund_request(mut self, refund: RefundRequest) -> Self {
        self.refunds.get_mut().push(refund);
        self
    }
}

#[async_trait]
impl FundRepository for InMemoryFundRepository {
    async fn find_by_request_grouped_by_funder(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<FundsByFunder>, DomainError> {
        Ok(self
            .funds
            .read()
            .await
            .get(request_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_pending_by_user(&self, user: &str) -> Result<Vec<PendingFund>, DomainError> {
        Ok(self
            .pending
            .read()
            .await
            .iter()
            .filter(|p| p.user.eq_ignore_ascii_case(user))
            .cloned()
            .collect())
    }

    async fn find_refund_requests(
        &self,
        request_id: &RequestId,
        statuses: &[RefundStatus],
    ) -> Result<Vec<RefundRequest>, DomainError> {
        Ok(self
            .refunds
            .read()
            .await
            .iter()
            .filter(|r| r.request_id == *request_id && statuses.contains(&r.status))
            .cloned()
            .collect())
    }
}
