//! TWAP trading bot for a Mango-style margin exchange.
//!
//! Layered bottom-up:
//!
//! - **Layer 0** `error`, `shared` — error taxonomy, sides/order types,
//!   lot scaling.
//! - **Layer 1** `group`, `program` — bundled group registry and raw
//!   instruction builders.
//! - **Layer 2** `domain` — typed markets, order books, positions, and
//!   the execution engine (mid price, pseudo market-order pricing).
//! - **Layer 3** `provider`, `oracle` — the RPC account/trade boundary
//!   and the trade-history price service.
//! - **Layer 4** `context`, `commands` — the assembled trading context
//!   and the CLI command flows.
//!
//! ```no_run
//! use mango_twap::prelude::*;
//!
//! # async fn run() -> Result<(), mango_twap::Error> {
//! let env = Env::load()?;
//! let ctx = TradeContext::connect(&env).await?;
//! let quote = ctx.engine().mid_price("SOL/USDC").await?;
//! println!("mid: {}", quote.mid());
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod group;
pub mod oracle;
pub mod program;
pub mod provider;
pub mod shared;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::Error;

pub mod prelude {
    pub use crate::config::Env;
    pub use crate::context::TradeContext;
    pub use crate::domain::execution::{MidPrice, OrderRequest};
    pub use crate::domain::market::Market;
    pub use crate::domain::orderbook::{BookOrder, OrderBookSnapshot};
    pub use crate::error::Error;
    pub use crate::group::{GroupConfig, MarketKind};
    pub use crate::shared::{OrderType, Side};
}
