//! On-chain market account layouts.

use solana_pubkey::Pubkey;

use crate::domain::layout::Reader;
use crate::error::DecodeError;

pub(crate) const SPOT_MARKET_LEN: usize = 112;
pub(crate) const PERP_MARKET_LEN: usize = 80;

/// Serum-style spot market header, trimmed to the fields the bot reads.
#[derive(Debug, Clone)]
pub(crate) struct SpotMarketLayout {
    pub own_address: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
}

impl SpotMarketLayout {
    pub(crate) fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < SPOT_MARKET_LEN {
            return Err(DecodeError::TooShort {
                account: "spot market",
                len: data.len(),
                need: SPOT_MARKET_LEN,
            });
        }
        let mut r = Reader::new("spot market", data);
        Ok(Self {
            own_address: r.pubkey()?,
            bids: r.pubkey()?,
            asks: r.pubkey()?,
            base_lot_size: r.u64()?,
            quote_lot_size: r.u64()?,
        })
    }
}

/// Perp market header, trimmed the same way.
#[derive(Debug, Clone)]
pub(crate) struct PerpMarketLayout {
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
}

impl PerpMarketLayout {
    pub(crate) fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < PERP_MARKET_LEN {
            return Err(DecodeError::TooShort {
                account: "perp market",
                len: data.len(),
                need: PERP_MARKET_LEN,
            });
        }
        let mut r = Reader::new("perp market", data);
        Ok(Self {
            bids: r.pubkey()?,
            asks: r.pubkey()?,
            base_lot_size: r.u64()?,
            quote_lot_size: r.u64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot_bytes() -> Vec<u8> {
        let mut buf = Vec::with_capacity(SPOT_MARKET_LEN);
        buf.extend_from_slice(Pubkey::new_from_array([1; 32]).as_ref());
        buf.extend_from_slice(Pubkey::new_from_array([2; 32]).as_ref());
        buf.extend_from_slice(Pubkey::new_from_array([3; 32]).as_ref());
        buf.extend_from_slice(&100u64.to_le_bytes());
        buf.extend_from_slice(&10u64.to_le_bytes());
        buf
    }

    #[test]
    fn test_spot_market_decode() {
        let bytes = spot_bytes();
        assert_eq!(bytes.len(), SPOT_MARKET_LEN);
        let m = SpotMarketLayout::decode(&bytes).unwrap();
        assert_eq!(m.bids, Pubkey::new_from_array([2; 32]));
        assert_eq!(m.asks, Pubkey::new_from_array([3; 32]));
        assert_eq!(m.base_lot_size, 100);
        assert_eq!(m.quote_lot_size, 10);
    }

    #[test]
    fn test_perp_market_decode() {
        let mut buf = Vec::with_capacity(PERP_MARKET_LEN);
        buf.extend_from_slice(Pubkey::new_from_array([4; 32]).as_ref());
        buf.extend_from_slice(Pubkey::new_from_array([5; 32]).as_ref());
        buf.extend_from_slice(&10u64.to_le_bytes());
        buf.extend_from_slice(&1u64.to_le_bytes());
        assert_eq!(buf.len(), PERP_MARKET_LEN);
        let m = PerpMarketLayout::decode(&buf).unwrap();
        assert_eq!(m.bids, Pubkey::new_from_array([4; 32]));
        assert_eq!(m.base_lot_size, 10);
    }

    #[test]
    fn test_truncated_account_rejected() {
        let bytes = spot_bytes();
        let err = SpotMarketLayout::decode(&bytes[..50]).unwrap_err();
        match err {
            DecodeError::TooShort { account, len, need } => {
                assert_eq!(account, "spot market");
                assert_eq!(len, 50);
                assert_eq!(need, SPOT_MARKET_LEN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
