//! Order book domain — UI-denominated book snapshots.

pub(crate) mod wire;

mod view;

pub use view::Books;

use rust_decimal::Decimal;
use solana_pubkey::Pubkey;

use crate::shared::Side;

/// A single resting order, prices and sizes in UI units.
#[derive(Debug, Clone, PartialEq)]
pub struct BookOrder {
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub owner: Pubkey,
    pub client_order_id: Option<u64>,
}

/// Both sides of a market's book at one point in time.
///
/// Bids are sorted best-first (descending price), asks best-first
/// (ascending price).
#[derive(Debug, Clone)]
pub struct OrderBookSnapshot {
    pub market: String,
    pub bids: Vec<BookOrder>,
    pub asks: Vec<BookOrder>,
}

impl OrderBookSnapshot {
    pub(crate) fn new(market: String, mut bids: Vec<BookOrder>, mut asks: Vec<BookOrder>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { market, bids, asks }
    }

    pub fn best_bid(&self) -> Option<&BookOrder> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookOrder> {
        self.asks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(side: Side, price: i64) -> BookOrder {
        BookOrder {
            side,
            price: Decimal::from(price),
            size: Decimal::ONE,
            owner: Pubkey::default(),
            client_order_id: None,
        }
    }

    #[test]
    fn test_snapshot_sorts_best_first() {
        let snap = OrderBookSnapshot::new(
            "SOL/USDC".into(),
            vec![order(Side::Buy, 9), order(Side::Buy, 11), order(Side::Buy, 10)],
            vec![order(Side::Sell, 14), order(Side::Sell, 12), order(Side::Sell, 13)],
        );
        assert_eq!(snap.best_bid().map(|o| o.price), Some(Decimal::from(11)));
        assert_eq!(snap.best_ask().map(|o| o.price), Some(Decimal::from(12)));
        assert_eq!(snap.bids[2].price, Decimal::from(9));
        assert_eq!(snap.asks[2].price, Decimal::from(14));
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = OrderBookSnapshot::new("SOL/USDC".into(), vec![], vec![]);
        assert!(snap.is_empty());
        assert!(snap.best_bid().is_none());
        assert!(snap.best_ask().is_none());
    }
}
