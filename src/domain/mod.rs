//! Domain modules (vertical slices): typed markets, order books, positions,
//! and the execution engine.

pub mod execution;
pub mod market;
pub mod orderbook;
pub mod position;

pub(crate) mod layout;
