//! Market domain — resolved spot and perp markets with their lot metadata.

pub(crate) mod wire;

mod registry;

pub use registry::Registry;

use solana_pubkey::Pubkey;

use crate::group::MarketSpec;

/// A spot market resolved against its on-chain account.
#[derive(Debug, Clone)]
pub struct SpotMarket {
    pub spec: MarketSpec,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
}

/// A perp market resolved against its on-chain account.
#[derive(Debug, Clone)]
pub struct PerpMarket {
    pub spec: MarketSpec,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
}

/// A resolved market of either kind. Matching on this is exhaustive:
/// code that handles markets must say what it does for both variants.
#[derive(Debug, Clone)]
pub enum Market {
    Spot(SpotMarket),
    Perp(PerpMarket),
}

impl Market {
    pub fn name(&self) -> &str {
        &self.spec().name
    }

    pub fn spec(&self) -> &MarketSpec {
        match self {
            Market::Spot(m) => &m.spec,
            Market::Perp(m) => &m.spec,
        }
    }

    pub fn base_lot_size(&self) -> u64 {
        match self {
            Market::Spot(m) => m.base_lot_size,
            Market::Perp(m) => m.base_lot_size,
        }
    }

    pub fn quote_lot_size(&self) -> u64 {
        match self {
            Market::Spot(m) => m.quote_lot_size,
            Market::Perp(m) => m.quote_lot_size,
        }
    }

    pub fn bids(&self) -> Pubkey {
        self.spec().bids
    }

    pub fn asks(&self) -> Pubkey {
        self.spec().asks
    }
}
