//! Token value domain entity
//!
//! A token amount as it is shown on a request: the token it is
//! denominated in and the total funded in that token.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Symbol of the platform's native token
pub const FND_SYMBOL: &str = "FND";

/// A total amount of a single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValue {
    #[serde(default)]
    pub token_address: Option<String>,
    pub token_symbol: String,
    pub total_amount: Decimal,
}

impl TokenValue {
    /// Create a token value, rejecting negative amounts
    pub fn new(
        token_symbol: impl Into<String>,
        total_amount: Decimal,
    ) -> Result<Self, DomainError> {
        let value = Self {
            token_address: None,
            token_symbol: token_symbol.into(),
            total_amount,
        };
        value.validate()?;
        Ok(value)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_amount < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "Negative amount {} for token {}",
                self.total_amount, self.token_symbol
            )));
        }
        Ok(())
    }

    pub fn is_positive(&self) -> bool {
        self.total_amount > Decimal::ZERO
    }

    /// Add another amount of the same token, failing when the sum overflows
    pub fn plus(&self, other: &TokenValue) -> Result<TokenValue, DomainError> {
        let total_amount = self
            .total_amount
            .checked_add(other.total_amount)
            .ok_or_else(|| {
                DomainError::Validation(format!("Total of token {} overflows", self.token_symbol))
            })?;
        Ok(TokenValue {
            token_address: self
                .token_address
                .clone()
                .or_else(|| other.token_address.clone()),
            token_symbol: self.token_symbol.clone(),
            total_amount,
        })
    }
}
