//! Last-traded-price oracle backed by the event-history HTTP API.

use rust_decimal::Decimal;
use serde::Deserialize;
use solana_pubkey::Pubkey;
use tracing::debug;

use crate::context::TradeContext;
use crate::error::Error;

pub const DEFAULT_EVENT_HISTORY_URL: &str = "https://event-history-api-candles.herokuapp.com";

#[derive(Debug, Deserialize)]
struct TradesResponse {
    /// Status flag; `"error"` means the market has no trade history.
    s: Option<String>,
    #[serde(default)]
    data: Vec<TradeRow>,
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    price: f64,
}

/// HTTP client for the trade-history service.
pub struct PriceOracle {
    http: reqwest::Client,
    base_url: String,
}

impl PriceOracle {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Last traded price on a market, `None` when the service has no
    /// history for it.
    pub async fn last_price_for(&self, market: &Pubkey) -> Result<Option<Decimal>, Error> {
        let url = format!("{}/trades/address/{}", self.base_url, market);
        debug!(%url, "fetching last trade");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::PriceFetch(e.to_string()))?
            .json::<TradesResponse>()
            .await
            .map_err(|e| Error::PriceFetch(e.to_string()))?;
        last_price(response)
    }
}

fn last_price(response: TradesResponse) -> Result<Option<Decimal>, Error> {
    if response.s.as_deref() == Some("error") {
        return Ok(None);
    }
    let row = response
        .data
        .first()
        .ok_or_else(|| Error::PriceFetch("empty trade history".to_string()))?;
    let price = Decimal::try_from(row.price)
        .map_err(|e| Error::PriceFetch(format!("bad trade price {}: {e}", row.price)))?;
    Ok(Some(price))
}

/// Oracle lookups by configured market name.
pub struct Oracle<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Oracle<'_> {
    pub async fn last_price(&self, market_name: &str) -> Result<Option<Decimal>, Error> {
        let spec = self.ctx.group.market(market_name)?;
        self.ctx.prices.last_price_for(&spec.market).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromStr;

    #[test]
    fn test_last_price_from_first_row() {
        let response: TradesResponse =
            serde_json::from_str(r#"{"s":"ok","data":[{"price":101.25},{"price":100.0}]}"#)
                .unwrap();
        assert_eq!(
            last_price(response).unwrap(),
            Some(Decimal::from_str("101.25").unwrap())
        );
    }

    #[test]
    fn test_error_status_means_no_price() {
        let response: TradesResponse =
            serde_json::from_str(r#"{"s":"error","data":[]}"#).unwrap();
        assert_eq!(last_price(response).unwrap(), None);
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let response: TradesResponse = serde_json::from_str(r#"{"s":"ok","data":[]}"#).unwrap();
        assert!(matches!(
            last_price(response).unwrap_err(),
            Error::PriceFetch(_)
        ));
    }
}
