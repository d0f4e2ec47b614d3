//! Pure conversion module between UI prices/sizes and native lot counts.
//!
//! All math uses `rust_decimal::Decimal` for exact arithmetic.
//! No async, no network calls.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during lot scaling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("size must be positive, got {0}")]
    NonPositiveSize(String),

    #[error("overflow: {context}")]
    Overflow { context: String },

    #[error("computed lot count is zero")]
    ZeroLots,
}

/// 10^d as an exact Decimal.
fn pow10(d: u32) -> Result<Decimal, ScalingError> {
    let mut n = Decimal::ONE;
    for _ in 0..d {
        n = n
            .checked_mul(Decimal::TEN)
            .ok_or_else(|| ScalingError::Overflow {
                context: format!("10^{}", d),
            })?;
    }
    Ok(n)
}

/// Convert a UI price to price lots.
///
/// ```text
/// price_lots = round(price * 10^quote_decimals * base_lot_size
///                    / (10^base_decimals * quote_lot_size))
/// ```
pub fn price_to_lots(
    price: Decimal,
    base_decimals: u8,
    quote_decimals: u8,
    base_lot_size: u64,
    quote_lot_size: u64,
) -> Result<u64, ScalingError> {
    if price <= Decimal::ZERO {
        return Err(ScalingError::NonPositivePrice(price.to_string()));
    }

    let numer = price
        .checked_mul(pow10(quote_decimals as u32)?)
        .and_then(|p| p.checked_mul(Decimal::from(base_lot_size)))
        .ok_or_else(|| ScalingError::Overflow {
            context: "price * 10^quote_decimals * base_lot_size".to_string(),
        })?;
    let denom = pow10(base_decimals as u32)?
        .checked_mul(Decimal::from(quote_lot_size))
        .ok_or_else(|| ScalingError::Overflow {
            context: "10^base_decimals * quote_lot_size".to_string(),
        })?;

    let lots = (numer / denom).round();
    let lots = lots.to_u64().ok_or_else(|| ScalingError::Overflow {
        context: format!("price lots {} do not fit in u64", lots),
    })?;
    if lots == 0 {
        return Err(ScalingError::ZeroLots);
    }
    Ok(lots)
}

/// Convert a UI size (base units) to size lots, rounding down.
pub fn size_to_lots(
    size: Decimal,
    base_decimals: u8,
    base_lot_size: u64,
) -> Result<u64, ScalingError> {
    if size <= Decimal::ZERO {
        return Err(ScalingError::NonPositiveSize(size.to_string()));
    }

    let native = size
        .checked_mul(pow10(base_decimals as u32)?)
        .ok_or_else(|| ScalingError::Overflow {
            context: "size * 10^base_decimals".to_string(),
        })?;

    let lots = (native / Decimal::from(base_lot_size)).floor();
    let lots = lots.to_u64().ok_or_else(|| ScalingError::Overflow {
        context: format!("size lots {} do not fit in u64", lots),
    })?;
    if lots == 0 {
        return Err(ScalingError::ZeroLots);
    }
    Ok(lots)
}

/// Convert price lots back to a UI price.
pub fn price_from_lots(
    lots: u64,
    base_decimals: u8,
    quote_decimals: u8,
    base_lot_size: u64,
    quote_lot_size: u64,
) -> Result<Decimal, ScalingError> {
    let numer = Decimal::from(lots)
        .checked_mul(Decimal::from(quote_lot_size))
        .and_then(|p| p.checked_mul(pow10(base_decimals as u32).ok()?))
        .ok_or_else(|| ScalingError::Overflow {
            context: "lots * quote_lot_size * 10^base_decimals".to_string(),
        })?;
    let denom = Decimal::from(base_lot_size)
        .checked_mul(pow10(quote_decimals as u32)?)
        .ok_or_else(|| ScalingError::Overflow {
            context: "base_lot_size * 10^quote_decimals".to_string(),
        })?;
    Ok(numer / denom)
}

/// Convert size lots back to a UI size in base units.
pub fn size_from_lots(
    lots: u64,
    base_decimals: u8,
    base_lot_size: u64,
) -> Result<Decimal, ScalingError> {
    let native = Decimal::from(lots)
        .checked_mul(Decimal::from(base_lot_size))
        .ok_or_else(|| ScalingError::Overflow {
            context: "lots * base_lot_size".to_string(),
        })?;
    Ok(native / pow10(base_decimals as u32)?)
}

/// Convert a signed base-lot position to UI units. Sign is preserved.
pub fn base_lots_to_ui(
    lots: i64,
    base_decimals: u8,
    base_lot_size: u64,
) -> Result<Decimal, ScalingError> {
    let native = Decimal::from(lots)
        .checked_mul(Decimal::from(base_lot_size))
        .ok_or_else(|| ScalingError::Overflow {
            context: "base lots * base_lot_size".to_string(),
        })?;
    Ok(native / pow10(base_decimals as u32)?)
}

/// Convert an unsigned native token amount to UI units.
pub fn native_to_ui(native: u64, decimals: u8) -> Result<Decimal, ScalingError> {
    Ok(Decimal::from(native) / pow10(decimals as u32)?)
}
