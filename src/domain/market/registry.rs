//! Market lookup backed by the configured group and the account fetcher.

use crate::context::TradeContext;
use crate::domain::market::wire::{PerpMarketLayout, SpotMarketLayout};
use crate::domain::market::{Market, PerpMarket, SpotMarket};
use crate::error::Error;
use crate::group::MarketKind;

/// Resolves configured market names to on-chain market state.
pub struct Registry<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Registry<'_> {
    /// Resolve a single market by name. Unknown names fail before any
    /// network access.
    pub async fn fetch(&self, name: &str) -> Result<Market, Error> {
        let spec = self.ctx.group.market(name)?.clone();
        let accounts = self.ctx.fetcher.fetch_multiple(&[spec.market]).await?;
        let data = accounts
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| Error::AccountFetch(format!("market account missing: {name}")))?;
        decode_market(spec, &data)
    }

    /// Resolve every market the group configures in one batched read.
    pub async fn fetch_all(&self) -> Result<Vec<Market>, Error> {
        let specs: Vec<_> = self.ctx.group.markets.clone();
        let keys: Vec<_> = specs.iter().map(|s| s.market).collect();
        let accounts = self.ctx.fetcher.fetch_multiple(&keys).await?;

        let mut markets = Vec::with_capacity(specs.len());
        for (spec, data) in specs.into_iter().zip(accounts) {
            let data = data.ok_or_else(|| {
                Error::AccountFetch(format!("market account missing: {}", spec.name))
            })?;
            markets.push(decode_market(spec, &data)?);
        }
        Ok(markets)
    }
}

// The configured keys must agree with the on-chain market header, or
// we are decoding some other program's account.
fn decode_market(spec: crate::group::MarketSpec, data: &[u8]) -> Result<Market, Error> {
    let mismatch = |spec: &crate::group::MarketSpec| {
        Error::AccountFetch(format!(
            "market account for {} does not match the configured group",
            spec.name
        ))
    };
    match spec.kind {
        MarketKind::Spot => {
            let layout = SpotMarketLayout::decode(data)?;
            if layout.own_address != spec.market
                || layout.bids != spec.bids
                || layout.asks != spec.asks
            {
                return Err(mismatch(&spec));
            }
            Ok(Market::Spot(SpotMarket {
                spec,
                base_lot_size: layout.base_lot_size,
                quote_lot_size: layout.quote_lot_size,
            }))
        }
        MarketKind::Perp => {
            let layout = PerpMarketLayout::decode(data)?;
            if layout.bids != spec.bids || layout.asks != spec.asks {
                return Err(mismatch(&spec));
            }
            Ok(Market::Perp(PerpMarket {
                spec,
                base_lot_size: layout.base_lot_size,
                quote_lot_size: layout.quote_lot_size,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::market::Market;
    use crate::error::Error;
    use crate::group::MarketKind;
    use crate::testutil::{test_context, MockFetcher};
    use std::sync::Arc;

    fn market_header(spec: &crate::group::MarketSpec) -> Vec<u8> {
        let mut buf = Vec::new();
        if spec.kind == MarketKind::Spot {
            buf.extend_from_slice(spec.market.as_ref());
        }
        buf.extend_from_slice(spec.bids.as_ref());
        buf.extend_from_slice(spec.asks.as_ref());
        buf.extend_from_slice(&100u64.to_le_bytes());
        buf.extend_from_slice(&10u64.to_le_bytes());
        buf
    }

    #[tokio::test]
    async fn test_fetch_all_resolves_every_market_in_one_read() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());
        for spec in &ctx.group.markets {
            fetcher.insert(spec.market, market_header(spec));
        }

        let markets = ctx.registry().fetch_all().await.unwrap();
        assert_eq!(markets.len(), ctx.group.markets.len());
        assert_eq!(fetcher.calls(), 1);
        for market in &markets {
            assert_eq!(market.base_lot_size(), 100);
        }
        assert!(markets
            .iter()
            .any(|m| matches!(m, Market::Perp(_)) && m.name() == "BTC-PERP"));
    }

    #[tokio::test]
    async fn test_missing_market_account_is_an_error() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());

        let err = ctx.registry().fetch("BTC/USDC").await.unwrap_err();
        assert!(matches!(err, Error::AccountFetch(_)));
    }

    #[tokio::test]
    async fn test_mismatched_header_rejected() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());
        let spec = ctx.group.market("BTC/USDC").unwrap().clone();
        let mut bytes = market_header(&spec);
        // Corrupt the bids key.
        bytes[40] ^= 0xff;
        fetcher.insert(spec.market, bytes);

        let err = ctx.registry().fetch("BTC/USDC").await.unwrap_err();
        assert!(matches!(err, Error::AccountFetch(_)));
    }
}
