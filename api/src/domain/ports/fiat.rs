//! Fiat price port
//!
//! Converts token amounts into US dollar estimates.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::entities::TokenValue;
use crate::error::FiatError;

/// Source of USD estimates for token amounts
#[async_trait]
pub trait FiatPriceLookup: Send + Sync {
    /// USD value of the whole amount (not the unit price)
    async fn usd_price(&self, token: &TokenValue) -> Result<Decimal, FiatError>;
}
