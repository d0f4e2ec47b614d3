//! Bulk cancel for one market.

use tracing::info;

use crate::context::TradeContext;
use crate::error::Error;

/// Cancel every resting order on the named market.
pub async fn cancel_command(ctx: &TradeContext, market: &str) -> Result<String, Error> {
    ctx.group.market(market)?;
    let signature = ctx.canceller().cancel_all(market).await?;
    info!("cancelled all orders on {market}: {signature}");
    Ok(signature)
}
