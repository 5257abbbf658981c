//! Fiat service
//!
//! Picks the fund entry of a request that is worth the most in USD, as
//! shown on the request badge.

use std::sync::Arc;

use crate::domain::entities::{AllFunds, TokenValue};
use crate::domain::ports::FiatPriceLookup;
use crate::error::FiatError;

/// Service for fiat valuations of funds
pub struct FiatService<FP>
where
    FP: FiatPriceLookup + ?Sized,
{
    prices: Arc<FP>,
}

impl<FP> FiatService<FP>
where
    FP: FiatPriceLookup + ?Sized,
{
    pub fn new(prices: Arc<FP>) -> Self {
        Self { prices }
    }

    /// The fund entry with the highest USD value.
    ///
    /// A single present entry is returned without a lookup. When both are
    /// present the FND entry wins only if it is worth strictly more, so a
    /// tie goes to the other token. Lookup errors are returned as is.
    pub async fn highest_fiat_funds(
        &self,
        funds: &AllFunds,
    ) -> Result<Option<TokenValue>, FiatError> {
        match (&funds.fnd_funds, &funds.other_funds) {
            (Some(fnd), Some(other)) => {
                let fnd_usd = self.prices.usd_price(fnd).await?;
                let other_usd = self.prices.usd_price(other).await?;
                if fnd_usd > other_usd {
                    Ok(Some(fnd.clone()))
                } else {
                    Ok(Some(other.clone()))
                }
            }
            (Some(only), None) | (None, Some(only)) => Ok(Some(only.clone())),
            (None, None) => Ok(None),
        }
    }
}
