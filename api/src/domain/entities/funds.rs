//! Fund domain entities
//!
//! Funds on a request are tracked per token kind: the native FND token and
//! one other token. Refunds and pending (unconfirmed) funds hang off the
//! same request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RequestId, TokenValue, FND_SYMBOL};
use crate::error::DomainError;

/// Fund aggregate of a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllFunds {
    #[serde(default)]
    pub fnd_funds: Option<TokenValue>,
    #[serde(default)]
    pub other_funds: Option<TokenValue>,
}

impl AllFunds {
    /// True if either token has a strictly positive total
    pub fn has_funds(&self) -> bool {
        self.fnd_funds.as_ref().is_some_and(TokenValue::is_positive)
            || self.other_funds.as_ref().is_some_and(TokenValue::is_positive)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(fnd) = &self.fnd_funds {
            if fnd.token_symbol != FND_SYMBOL {
                return Err(DomainError::Validation(format!(
                    "FND funds held in {}",
                    fnd.token_symbol
                )));
            }
            fnd.validate()?;
        }
        if let Some(other) = &self.other_funds {
            other.validate()?;
        }
        Ok(())
    }

    /// Sum two aggregates token by token.
    ///
    /// The other-token side of a request is denominated in a single token,
    /// so summing two different other tokens is rejected.
    pub fn merge(&self, other: &AllFunds) -> Result<AllFunds, DomainError> {
        Ok(AllFunds {
            fnd_funds: merge_token(self.fnd_funds.as_ref(), other.fnd_funds.as_ref())?,
            other_funds: merge_token(self.other_funds.as_ref(), other.other_funds.as_ref())?,
        })
    }
}

fn merge_token(
    a: Option<&TokenValue>,
    b: Option<&TokenValue>,
) -> Result<Option<TokenValue>, DomainError> {
    match (a, b) {
        (Some(a), Some(b)) if a.token_symbol != b.token_symbol => Err(DomainError::Validation(
            format!("Cannot add {} to {}", b.token_symbol, a.token_symbol),
        )),
        (Some(a), Some(b)) => a.plus(b).map(Some),
        (Some(v), None) | (None, Some(v)) => Ok(Some(v.clone())),
        (None, None) => Ok(None),
    }
}

/// Funds a single funder put on a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsByFunder {
    pub funder_address: String,
    #[serde(flatten)]
    pub funds: AllFunds,
}

/// Funds on a request grouped by funder, with the overall totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsForRequest {
    pub funds: Vec<FundsByFunder>,
    pub totals: AllFunds,
}

impl FundsForRequest {
    pub fn from_funders(funds: Vec<FundsByFunder>) -> Result<Self, DomainError> {
        let totals = funds
            .iter()
            .try_fold(AllFunds::default(), |acc, f| acc.merge(&f.funds))?;
        Ok(Self { funds, totals })
    }
}

/// A fund transaction that was submitted but is not yet confirmed on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFund {
    pub transaction_hash: String,
    pub funder_address: String,
    /// Email of the user that submitted the transaction
    pub user: String,
    pub request_id: RequestId,
    pub amount: TokenValue,
    pub created_at: DateTime<Utc>,
}

/// Refund request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    Pending,
    Approved,
    Processed,
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundStatus::Pending => write!(f, "PENDING"),
            RefundStatus::Approved => write!(f, "APPROVED"),
            RefundStatus::Processed => write!(f, "PROCESSED"),
        }
    }
}

/// A funder asking for their funds back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    pub id: i64,
    pub request_id: RequestId,
    pub funder_address: String,
    pub status: RefundStatus,
}
