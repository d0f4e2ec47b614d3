//! On-chain program constants.

/// Instruction discriminators (first data byte).
pub mod instruction {
    pub const PLACE_SPOT_ORDER: u8 = 9;
    pub const PLACE_PERP_ORDER: u8 = 12;
    pub const CANCEL_ALL_ORDERS: u8 = 20;
}

/// Maximum resting orders removed by a single cancel-all instruction.
pub const CANCEL_ALL_LIMIT: u8 = 20;
