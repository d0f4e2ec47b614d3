//! Bulk order cancellation.

use tracing::info;

use crate::context::TradeContext;
use crate::error::Error;

/// Cancels every resting order the margin account has on a market.
pub struct Canceller<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Canceller<'_> {
    /// Submit a cancel-all for the named market and return the
    /// transaction signature.
    pub async fn cancel_all(&self, market_name: &str) -> Result<String, Error> {
        let spec = self.ctx.group.market(market_name)?;
        info!(market = market_name, "cancelling all orders");
        self.ctx
            .gateway
            .cancel_all_orders(spec, &self.ctx.margin_account)
            .await
    }
}
