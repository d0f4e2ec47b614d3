//! Command layer — the flows behind the CLI subcommands.
//!
//! Commands validate the market name against the configured group
//! before touching the network, and treat "no signature returned" as
//! order-not-placed.

mod cancel;
mod market_order;
mod order;

pub use cancel::cancel_command;
pub use market_order::{market_order_command, MarketOrderArgs};
pub use order::{order_command, OrderArgs};

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::context::TradeContext;
use crate::shared::Side;

/// Absolute price gate: buys are skipped above the threshold, sells
/// below it. No threshold, or no last price to compare, allows the
/// order through.
fn threshold_allows(side: Side, last_price: Option<Decimal>, threshold: Option<Decimal>) -> bool {
    let Some(threshold) = threshold.filter(|t| *t > Decimal::ZERO) else {
        return true;
    };
    let Some(last_price) = last_price else {
        warn!("no last trade price available, skipping threshold check");
        return true;
    };
    match side {
        Side::Buy if last_price > threshold => {
            info!("current price {last_price} is greater than {threshold}, skip buy for now");
            false
        }
        Side::Sell if last_price < threshold => {
            info!("current price {last_price} is smaller than {threshold}, skip sell for now");
            false
        }
        _ => true,
    }
}

/// Log the current net position, tolerating read failures.
async fn log_position(ctx: &TradeContext, market: &str) {
    match ctx.positions().position(market).await {
        Ok(position) => info!("current position on {market}: {position}"),
        Err(e) => warn!("could not read position on {market}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_threshold_gates_buy_above() {
        assert!(!threshold_allows(
            Side::Buy,
            Some(d("101")),
            Some(d("100"))
        ));
        assert!(threshold_allows(Side::Buy, Some(d("99")), Some(d("100"))));
    }

    #[test]
    fn test_threshold_gates_sell_below() {
        assert!(!threshold_allows(
            Side::Sell,
            Some(d("99")),
            Some(d("100"))
        ));
        assert!(threshold_allows(Side::Sell, Some(d("101")), Some(d("100"))));
    }

    #[test]
    fn test_no_threshold_always_allows() {
        assert!(threshold_allows(Side::Buy, Some(d("1000000")), None));
        assert!(threshold_allows(
            Side::Sell,
            Some(d("0.0001")),
            Some(Decimal::ZERO)
        ));
    }

    #[test]
    fn test_missing_last_price_allows() {
        assert!(threshold_allows(Side::Buy, None, Some(d("100"))));
        assert!(threshold_allows(Side::Sell, None, Some(d("100"))));
    }
}
