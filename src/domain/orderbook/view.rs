//! Book snapshot fetching and lot-to-UI conversion.

use crate::context::TradeContext;
use crate::domain::market::Market;
use crate::domain::orderbook::wire::{
    BookSideLayout, BOOK_SIDE_TAG_ASKS, BOOK_SIDE_TAG_BIDS,
};
use crate::domain::orderbook::{BookOrder, OrderBookSnapshot};
use crate::domain::position::MarginAccount;
use crate::error::Error;
use crate::shared::lots::{price_from_lots, size_from_lots};
use crate::shared::Side;
use solana_pubkey::Pubkey;

/// Order book access for a resolved market.
pub struct Books<'a> {
    pub(crate) ctx: &'a TradeContext,
}

impl Books<'_> {
    /// Fetch both sides of a market's book in one batched read.
    ///
    /// With `owner` set, the snapshot is filtered down to that account's
    /// resting orders. Book entries reference the open-orders account on
    /// spot markets and the margin account itself on perp markets.
    pub async fn snapshot(
        &self,
        market: &Market,
        owner: Option<&MarginAccount>,
    ) -> Result<OrderBookSnapshot, Error> {
        let filter = match owner {
            None => None,
            Some(margin) => match market {
                Market::Perp(_) => Some(margin.address),
                Market::Spot(_) => {
                    match margin.spot_open_orders(market.spec().market_index)? {
                        Some(open_orders) => Some(open_orders),
                        // No open-orders account means no resting orders.
                        None => {
                            return Ok(OrderBookSnapshot::new(
                                market.name().to_string(),
                                vec![],
                                vec![],
                            ))
                        }
                    }
                }
            },
        };

        let accounts = self
            .ctx
            .fetcher
            .fetch_multiple(&[market.bids(), market.asks()])
            .await?;
        let mut accounts = accounts.into_iter();
        let bids_data = accounts.next().flatten();
        let asks_data = accounts.next().flatten();

        let bids = self.decode_side(market, bids_data, Side::Buy, filter)?;
        let asks = self.decode_side(market, asks_data, Side::Sell, filter)?;
        Ok(OrderBookSnapshot::new(market.name().to_string(), bids, asks))
    }

    fn decode_side(
        &self,
        market: &Market,
        data: Option<Vec<u8>>,
        side: Side,
        filter: Option<Pubkey>,
    ) -> Result<Vec<BookOrder>, Error> {
        let data = match data {
            Some(data) => data,
            // A missing side account reads as an empty side.
            None => return Ok(vec![]),
        };

        let layout = BookSideLayout::decode(&data)?;
        let expected_tag = match side {
            Side::Buy => BOOK_SIDE_TAG_BIDS,
            Side::Sell => BOOK_SIDE_TAG_ASKS,
        };
        if layout.tag != expected_tag {
            return Err(Error::AccountFetch(format!(
                "book side tag {} does not match {} side of {}",
                layout.tag,
                side,
                market.name()
            )));
        }

        let spec = market.spec();
        let mut orders = Vec::with_capacity(layout.entries.len());
        for entry in layout.entries {
            if let Some(key) = filter {
                if entry.owner != key {
                    continue;
                }
            }
            orders.push(BookOrder {
                side,
                price: price_from_lots(
                    entry.price_lots,
                    spec.base_decimals,
                    spec.quote_decimals,
                    market.base_lot_size(),
                    market.quote_lot_size(),
                )?,
                size: size_from_lots(
                    entry.size_lots,
                    spec.base_decimals,
                    market.base_lot_size(),
                )?,
                owner: entry.owner,
                client_order_id: (entry.client_order_id != 0).then_some(entry.client_order_id),
            });
        }
        Ok(orders)
    }
}
