//! On-chain program interaction: instruction builders and native-unit params.

pub mod constants;
pub mod instructions;

use crate::shared::{OrderType, Side};

/// Native-unit order parameters, ready for instruction encoding.
///
/// Produced by the execution engine from UI-unit requests via
/// [`crate::shared::lots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderParams {
    pub side: Side,
    pub price_lots: u64,
    pub size_lots: u64,
    pub order_type: OrderType,
    /// 0 when the caller did not assign one.
    pub client_order_id: u64,
}

impl Side {
    pub(crate) fn to_wire(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }
}

impl OrderType {
    pub(crate) fn to_wire(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::ImmediateOrCancel => 1,
            OrderType::PostOnly => 2,
            OrderType::Market => 3,
        }
    }
}
