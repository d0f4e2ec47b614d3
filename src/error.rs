//! Unified bot error types.

use thiserror::Error;

/// Top-level error for every fallible bot operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Market name is not in the configured group. Raised before any I/O.
    #[error("unknown market: {0} is not available")]
    UnknownMarket(String),

    /// An account read from the chain failed (network/timeout). Not retried.
    #[error("account fetch failed: {0}")]
    AccountFetch(String),

    /// The trade-history oracle could not be reached or returned no
    /// usable data. Not retried.
    #[error("price fetch failed: {0}")]
    PriceFetch(String),

    /// Not enough resting liquidity to price the requested quantity.
    #[error("order book for {market} cannot satisfy quantity {quantity}")]
    EmptyBook { market: String, quantity: String },

    /// The book is missing a best bid or best ask, so no quote can be
    /// built from it.
    #[error("order book for {0} is missing a best bid or ask")]
    NoQuotes(String),

    /// No margin account could be located for the configured owner. Fatal.
    #[error("margin account discovery failed: {0}")]
    AccountDiscovery(String),

    /// A fetched account buffer did not match its expected layout.
    #[error("account decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Order submission was rejected or the transaction failed to land.
    #[error("order submission failed: {0}")]
    Submit(String),

    /// Startup configuration problem (env vars, keys, intervals).
    #[error("config error: {0}")]
    Config(String),

    #[error("scaling error: {0}")]
    Scaling(#[from] crate::shared::lots::ScalingError),
}

/// Account-buffer decoding errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{account}: buffer too short ({len} bytes, need {need})")]
    TooShort {
        account: &'static str,
        len: usize,
        need: usize,
    },

    #[error("{account}: bad tag {tag}")]
    BadTag { account: &'static str, tag: u8 },

    #[error("{account}: index {index} out of range (max {max})")]
    IndexOutOfRange {
        account: &'static str,
        index: usize,
        max: usize,
    },
}
