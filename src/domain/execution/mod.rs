//! Execution domain — pricing and order placement.
//!
//! Pseudo market orders are priced by walking the opposing side of the
//! book until enough cumulative size is found, then padding the clearing
//! price so the order crosses even if the book moves slightly.

mod cancel;

pub use cancel::Canceller;

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::context::TradeContext;
use crate::domain::market::Market;
use crate::error::Error;
use crate::shared::lots::{price_to_lots, size_to_lots};
use crate::shared::{OrderType, Side};

/// Best quotes of a book. The mid is reported even when the book is
/// crossed; callers decide whether a crossed mid is usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidPrice {
    pub best_bid: Decimal,
    pub best_ask: Decimal,
}

impl MidPrice {
    pub fn mid(&self) -> Decimal {
        (self.best_bid + self.best_ask) / Decimal::TWO
    }
}

/// An order as the caller states it, prices and sizes in UI units.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub market: String,
    pub side: Side,
    pub quantity: Decimal,
    /// Required for resting order types, ignored for market orders.
    pub price: Option<Decimal>,
    pub order_type: OrderType,
    pub client_order_id: Option<u64>,
}

/// Order pricing and placement for the context's margin account.
pub struct Engine<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Engine<'_> {
    /// Best bid, best ask, and their midpoint.
    pub async fn mid_price(&self, market_name: &str) -> Result<MidPrice, Error> {
        let market = self.ctx.registry().fetch(market_name).await?;
        let book = self.ctx.books().snapshot(&market, None).await?;
        let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) else {
            return Err(Error::NoQuotes(market_name.to_string()));
        };
        Ok(MidPrice {
            best_bid: bid.price,
            best_ask: ask.price,
        })
    }

    /// Price a pseudo market order of `quantity` by walking the opposing
    /// side of the book. The first resting order at which cumulative
    /// size reaches `quantity` is the clearing order; its price is
    /// padded 5% through the book so the order still crosses.
    pub async fn market_price(
        &self,
        market_name: &str,
        quantity: Decimal,
        side: Side,
    ) -> Result<Decimal, Error> {
        let market = self.ctx.registry().fetch(market_name).await?;
        let book = self.ctx.books().snapshot(&market, None).await?;
        let opposing = match side {
            Side::Buy => &book.asks,
            Side::Sell => &book.bids,
        };

        let mut cumulative = Decimal::ZERO;
        for order in opposing {
            cumulative += order.size;
            if cumulative >= quantity {
                let padding = match side {
                    Side::Buy => Decimal::new(105, 2),
                    Side::Sell => Decimal::new(95, 2),
                };
                return Ok(order.price * padding);
            }
        }
        Err(Error::EmptyBook {
            market: market_name.to_string(),
            quantity: quantity.to_string(),
        })
    }

    /// The price a submission of `request` would carry: the explicit
    /// price for resting types, the walked book price for spot market
    /// orders, the sentinel for perp market orders. A dry run through
    /// here previews exactly what [`place`](Self::place) would send.
    pub async fn resolve_price(&self, request: &OrderRequest) -> Result<Decimal, Error> {
        let market = self.ctx.registry().fetch(&request.market).await?;
        let (price, _) = self.effective_price(&market, request).await?;
        Ok(price)
    }

    /// The wire price and type for a request against a resolved market.
    async fn effective_price(
        &self,
        market: &Market,
        request: &OrderRequest,
    ) -> Result<(Decimal, OrderType), Error> {
        match (market, request.order_type) {
            // Perp market orders skip the book walk entirely.
            (Market::Perp(_), OrderType::Market) => Ok((Decimal::ONE, OrderType::Market)),
            (Market::Spot(_), OrderType::Market) => {
                let walked = self
                    .market_price(&request.market, request.quantity, request.side)
                    .await?;
                Ok((walked, OrderType::Limit))
            }
            (_, order_type) => {
                let price = request.price.ok_or_else(|| {
                    Error::Config(format!(
                        "{} order on {} requires a price",
                        order_type.as_str(),
                        request.market
                    ))
                })?;
                Ok((price, order_type))
            }
        }
    }

    /// Place an order and return the transaction signature.
    ///
    /// Spot markets have no native market order type, so a market
    /// request is submitted as a limit at the walked price. Perp market
    /// orders go through with a sentinel price of 1; the program prices
    /// them against the book.
    pub async fn place(&self, request: &OrderRequest) -> Result<String, Error> {
        let market = self.ctx.registry().fetch(&request.market).await?;
        let spec = market.spec();

        let (wire_price, wire_type) = self.effective_price(&market, request).await?;

        let params = crate::program::OrderParams {
            side: request.side,
            price_lots: price_to_lots(
                wire_price,
                spec.base_decimals,
                spec.quote_decimals,
                market.base_lot_size(),
                market.quote_lot_size(),
            )?,
            size_lots: size_to_lots(request.quantity, spec.base_decimals, market.base_lot_size())?,
            order_type: wire_type,
            client_order_id: request.client_order_id.unwrap_or(0),
        };

        info!(
            market = %request.market,
            side = %request.side,
            quantity = %request.quantity,
            price = %wire_price,
            order_type = wire_type.as_str(),
            "placing order"
        );

        match &market {
            Market::Spot(_) => {
                self.ctx
                    .gateway
                    .place_spot_order(spec, &self.ctx.margin_account, &params)
                    .await
            }
            Market::Perp(_) => {
                self.ctx
                    .gateway
                    .place_perp_order(spec, &self.ctx.margin_account, &params)
                    .await
            }
        }
    }

    /// [`place`](Self::place), but failures are logged instead of
    /// propagated. `None` means the order was not placed.
    pub async fn submit(&self, request: &OrderRequest) -> Option<String> {
        match self.place(request).await {
            Ok(signature) => Some(signature),
            Err(e) => {
                error!(market = %request.market, "order not placed: {e}");
                None
            }
        }
    }
}
