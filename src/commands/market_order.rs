//! Pseudo market order, the per-tick body of the twap schedule.

use rust_decimal::Decimal;
use tracing::info;

use crate::context::TradeContext;
use crate::domain::execution::OrderRequest;
use crate::error::Error;
use crate::shared::{OrderType, Side};

use super::{log_position, threshold_allows};

#[derive(Debug, Clone)]
pub struct MarketOrderArgs {
    pub market: String,
    pub side: Side,
    pub amount: Decimal,
    pub price_threshold: Option<Decimal>,
    pub dry_run: bool,
}

/// Submit a pseudo market order. `Ok(None)` means the order was gated,
/// dry-run, or not placed.
pub async fn market_order_command(
    ctx: &TradeContext,
    args: &MarketOrderArgs,
) -> Result<Option<String>, Error> {
    ctx.group.market(&args.market)?;

    log_position(ctx, &args.market).await;

    if args.price_threshold.is_some_and(|t| t > Decimal::ZERO) {
        let last_price = ctx.oracle().last_price(&args.market).await?;
        if !threshold_allows(args.side, last_price, args.price_threshold) {
            return Ok(None);
        }
    }

    let request = OrderRequest {
        market: args.market.clone(),
        side: args.side,
        quantity: args.amount,
        price: None,
        order_type: OrderType::Market,
        client_order_id: None,
    };

    if args.dry_run {
        let price = ctx.engine().resolve_price(&request).await?;
        info!(
            "dry run: would {} {} on {} at {price}",
            args.side, args.amount, args.market
        );
        return Ok(None);
    }

    Ok(ctx.engine().submit(&request).await)
}
