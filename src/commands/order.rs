//! One-shot post-only order at the mid price.

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::context::TradeContext;
use crate::domain::execution::OrderRequest;
use crate::error::Error;
use crate::shared::{OrderType, Side};

use super::{log_position, threshold_allows};

#[derive(Debug, Clone)]
pub struct OrderArgs {
    pub market: String,
    pub side: Side,
    pub amount: Decimal,
    pub price_threshold: Option<Decimal>,
}

/// Cancel existing orders, then rest a post-only order at the book's
/// mid price. `Ok(None)` means the order was gated or not placed.
pub async fn order_command(
    ctx: &TradeContext,
    args: &OrderArgs,
) -> Result<Option<String>, Error> {
    ctx.group.market(&args.market)?;

    log_position(ctx, &args.market).await;

    if let Err(e) = ctx.canceller().cancel_all(&args.market).await {
        error!("cancel before order failed: {e}");
    }

    let last_price = ctx.oracle().last_price(&args.market).await?;
    if let Some(price) = last_price {
        info!("last trade on {} was at price {price}", args.market);
    }

    let quote = ctx.engine().mid_price(&args.market).await?;
    info!(
        "best bid on {} at {}, best ask at {}",
        args.market, quote.best_bid, quote.best_ask
    );

    if !threshold_allows(args.side, last_price, args.price_threshold) {
        return Ok(None);
    }

    let mid = quote.mid();
    info!(
        "placing a {} post-only order at mid price {mid} of size {} on {}",
        args.side, args.amount, args.market
    );
    let request = OrderRequest {
        market: args.market.clone(),
        side: args.side,
        quantity: args.amount,
        price: Some(mid),
        order_type: OrderType::PostOnly,
        client_order_id: None,
    };
    Ok(ctx.engine().submit(&request).await)
}
