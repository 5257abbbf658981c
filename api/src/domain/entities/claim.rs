//! Claim domain entities
//!
//! A claim pays the funds of a request out to its solver. Users ask for a
//! claim, which then waits for approval before it is settled on chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AllFunds, Platform, RequestId};
use crate::error::DomainError;

/// A settled claim, identified by its transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub request_id: RequestId,
    pub transaction_hash: String,
    pub solver: String,
    pub claimed_at: DateTime<Utc>,
    pub funds: AllFunds,
}

/// Claims on a request grouped by transaction, with the claimed totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsByTransactionAggregate {
    pub claims: Vec<Claim>,
    pub totals: AllFunds,
}

impl ClaimsByTransactionAggregate {
    pub fn from_claims(mut claims: Vec<Claim>) -> Result<Self, DomainError> {
        claims.sort_by(|a, b| a.claimed_at.cmp(&b.claimed_at));
        let totals = claims
            .iter()
            .try_fold(AllFunds::default(), |acc, c| acc.merge(&c.funds))?;
        Ok(Self { claims, totals })
    }
}

/// Unique identifier for a claim request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimRequestId(pub Uuid);

/// A user asking to be paid out for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub id: ClaimRequestId,
    pub request_id: RequestId,
    pub platform: Platform,
    pub platform_id: String,
    /// Ether address the funds should go to
    pub address: String,
    /// Email of the requesting user
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
}

/// Data needed to record a claim request
#[derive(Debug, Clone)]
pub struct NewClaimRequest {
    pub request_id: RequestId,
    pub platform: Platform,
    pub platform_id: String,
    pub address: String,
    pub requested_by: String,
}

/// Whether a request can be claimed, and by the current user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaimable {
    pub claimable: bool,
    pub claimable_by_logged_in_user: bool,
}
