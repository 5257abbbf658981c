//! CryptoCompare price API client
//!
//! Looks up the USD unit price of a token symbol and multiplies it by the
//! amount. Every call goes to the API; prices are not cached.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::TokenValue;
use crate::domain::ports::FiatPriceLookup;
use crate::error::FiatError;

/// Implementation of the fiat price port against a CryptoCompare-compatible API
pub struct CryptoCompareClient {
    http: Client,
    base_url: String,
}

impl CryptoCompareClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn price_url(&self, symbol: &str) -> String {
        format!(
            "{}/data/price?fsym={}&tsyms=USD",
            self.base_url,
            encode(symbol)
        )
    }

    /// USD price of one unit of the token
    async fn unit_price(&self, symbol: &str) -> Result<Decimal, FiatError> {
        let response = self.http.get(self.price_url(symbol)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FiatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| FiatError::Deserialization(e.to_string()))?;

        unit_price_from(symbol, body)
    }
}

/// Response of `/data/price`; errors come back as 200 with a message
#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(rename = "USD")]
    usd: Option<Decimal>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

fn unit_price_from(symbol: &str, body: PriceResponse) -> Result<Decimal, FiatError> {
    match body.usd {
        Some(price) => Ok(price),
        None => {
            if let Some(message) = body.message {
                tracing::debug!(symbol, %message, "Price API returned no USD price");
            }
            Err(FiatError::UnknownToken(symbol.to_string()))
        }
    }
}

#[async_trait]
impl FiatPriceLookup for CryptoCompareClient {
    async fn usd_price(&self, token: &TokenValue) -> Result<Decimal, FiatError> {
        let unit = self.unit_price(&token.token_symbol).await?;
        usd_value(unit, token)
    }
}

fn usd_value(unit: Decimal, token: &TokenValue) -> Result<Decimal, FiatError> {
    unit.checked_mul(token.total_amount)
        .ok_or_else(|| FiatError::OutOfRange(token.token_symbol.clone()))
}
