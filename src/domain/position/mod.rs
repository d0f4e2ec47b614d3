//! Position domain — net base exposure per market.

pub(crate) mod wire;

pub use wire::MarginAccount;

use rust_decimal::Decimal;

use crate::context::TradeContext;
use crate::error::Error;
use crate::group::{MarketKind, MarketSpec};
use crate::shared::lots::{base_lots_to_ui, native_to_ui};
use wire::{CacheLayout, OpenOrdersLayout};

/// Reads the account's net position on a market, in UI base units.
pub struct Positions<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Positions<'_> {
    /// Net position for a market by name. Positive means long.
    ///
    /// Spot positions count deposits, tokens locked in resting orders,
    /// and borrows. Perp positions are the signed base-lot balance.
    pub async fn position(&self, name: &str) -> Result<Decimal, Error> {
        let spec = self.ctx.group.market(name)?.clone();
        match spec.kind {
            MarketKind::Spot => self.spot_position(&spec).await,
            MarketKind::Perp => self.perp_position(&spec).await,
        }
    }

    async fn perp_position(&self, spec: &MarketSpec) -> Result<Decimal, Error> {
        let market = self.ctx.registry().fetch(&spec.name).await?;
        let margin = self.ctx.margin_account_state().await?;
        let lots = margin.perp_base_lots(spec.market_index)?;
        Ok(base_lots_to_ui(
            lots,
            spec.base_decimals,
            market.base_lot_size(),
        )?)
    }

    async fn spot_position(&self, spec: &MarketSpec) -> Result<Decimal, Error> {
        let keys = [self.ctx.margin_account, self.ctx.group.cache];
        let accounts = self.ctx.fetcher.fetch_multiple(&keys).await?;
        let mut accounts = accounts.into_iter();
        let margin_data = accounts
            .next()
            .flatten()
            .ok_or_else(|| Error::AccountFetch("margin account missing".to_string()))?;
        let cache_data = accounts
            .next()
            .flatten()
            .ok_or_else(|| Error::AccountFetch("cache account missing".to_string()))?;

        let margin = MarginAccount::decode(self.ctx.margin_account, &margin_data)?;
        let cache = CacheLayout::decode(&cache_data)?;

        let index = spec.market_index;
        let deposits = native_to_ui(margin.deposit(index)?, spec.base_decimals)?
            * cache.deposit_index(index)?;
        let borrows = native_to_ui(margin.borrow(index)?, spec.base_decimals)?
            * cache.borrow_index(index)?;

        let locked = match margin.spot_open_orders(index)? {
            Some(open_orders) => {
                let accounts = self.ctx.fetcher.fetch_multiple(&[open_orders]).await?;
                let data = accounts.into_iter().next().flatten().ok_or_else(|| {
                    Error::AccountFetch("open orders account missing".to_string())
                })?;
                let oo = OpenOrdersLayout::decode(&data)?;
                native_to_ui(oo.base_locked(), spec.base_decimals)?
            }
            None => Decimal::ZERO,
        };

        Ok(deposits + locked - borrows)
    }
}

#[cfg(test)]
mod tests {
    use super::wire::test_encode;
    use crate::testutil::{test_context, MockFetcher};
    use rust_decimal::prelude::FromStr;
    use rust_decimal::Decimal;
    use solana_pubkey::Pubkey;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_spot_position_counts_locked_and_borrows() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());
        let spec = ctx.group.market("SOL/USDC").unwrap().clone();
        let owner = ctx.owner;

        let open_orders_key = Pubkey::new_from_array([42; 32]);
        // 2.5 SOL deposited, 0.5 borrowed (9 decimals), indices at 1.0.
        fetcher.insert(
            ctx.margin_account,
            test_encode::margin_account(
                owner,
                &[(spec.market_index, 2_500_000_000)],
                &[(spec.market_index, 500_000_000)],
                &[(spec.market_index, open_orders_key)],
                &[],
            ),
        );
        fetcher.insert(ctx.group.cache, test_encode::cache(&[]));
        // 1.2 SOL locked in resting orders.
        fetcher.insert(
            open_orders_key,
            test_encode::open_orders(300_000_000, 1_500_000_000, 0, 0),
        );

        let position = ctx.positions().position("SOL/USDC").await.unwrap();
        assert_eq!(position, Decimal::from_str("3.2").unwrap());
    }

    #[tokio::test]
    async fn test_spot_position_without_open_orders() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());
        let spec = ctx.group.market("SOL/USDC").unwrap().clone();

        fetcher.insert(
            ctx.margin_account,
            test_encode::margin_account(
                ctx.owner,
                &[(spec.market_index, 1_000_000_000)],
                &[],
                &[],
                &[],
            ),
        );
        fetcher.insert(ctx.group.cache, test_encode::cache(&[]));

        let position = ctx.positions().position("SOL/USDC").await.unwrap();
        assert_eq!(position, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_unknown_market_fails_before_any_fetch() {
        let fetcher = Arc::new(MockFetcher::default());
        let ctx = test_context(fetcher.clone());

        let err = ctx.positions().position("DOGE-PERP").await.unwrap_err();
        assert!(err.to_string().contains("DOGE-PERP"));
        assert_eq!(fetcher.calls(), 0);
    }
}
