//! Fund service
//!
//! Funds, pending funds and refund requests of a request.

use std::sync::Arc;

use crate::domain::entities::{
    FundsForRequest, PendingFund, RefundRequest, RefundStatus, RequestId, UserProfile,
};
use crate::domain::ports::FundRepository;
use crate::error::AppError;

/// Service for querying funds
pub struct FundService<FR>
where
    FR: FundRepository + ?Sized,
{
    funds: Arc<FR>,
}

impl<FR> FundService<FR>
where
    FR: FundRepository + ?Sized,
{
    pub fn new(funds: Arc<FR>) -> Self {
        Self { funds }
    }

    /// Funds on a request, one entry per funder plus totals
    pub async fn funds_for_request_grouped_by_funder(
        &self,
        request_id: &RequestId,
    ) -> Result<FundsForRequest, AppError> {
        let grouped = self
            .funds
            .find_by_request_grouped_by_funder(request_id)
            .await?;
        Ok(FundsForRequest::from_funders(grouped)?)
    }

    /// Fund transactions of the user that are not confirmed yet
    pub async fn pending_funds_for_user(
        &self,
        user: &UserProfile,
    ) -> Result<Vec<PendingFund>, AppError> {
        Ok(self.funds.find_pending_by_user(&user.email).await?)
    }

    pub async fn refund_requests_for(
        &self,
        request_id: &RequestId,
        statuses: &[RefundStatus],
    ) -> Result<Vec<RefundRequest>, AppError> {
        Ok(self
            .funds
            .find_refund_requests(request_id, statuses)
            .await?)
    }

    /// Lowercased addresses of funders with an open (pending or approved) refund
    pub async fn pending_refund_addresses(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<String>, AppError> {
        let refunds = self
            .refund_requests_for(request_id, &[RefundStatus::Pending, RefundStatus::Approved])
            .await?;
        Ok(refunds
            .into_iter()
            .map(|r| r.funder_address.to_lowercase())
            .collect())
    }
}
