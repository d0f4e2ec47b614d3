//! Margin account, open-orders, and cache account layouts.

use rust_decimal::Decimal;
use solana_pubkey::Pubkey;

use crate::domain::layout::Reader;
use crate::error::DecodeError;

pub(crate) const MAX_TOKENS: usize = 16;
pub(crate) const MAX_PAIRS: usize = 15;

pub(crate) const MARGIN_ACCOUNT_LEN: usize =
    32 + MAX_TOKENS * 8 * 2 + MAX_PAIRS * 32 + MAX_PAIRS * 8;
pub(crate) const OPEN_ORDERS_LEN: usize = 40;
pub(crate) const CACHE_LEN: usize = MAX_TOKENS * 16;

/// Fixed-point scale of the cache deposit/borrow indices.
pub(crate) const INDEX_SCALE: u64 = 1_000_000_000_000;

/// A user's margin account. Token slots are indexed by market index,
/// with the quote token in the last slot.
#[derive(Debug, Clone)]
pub struct MarginAccount {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub deposits: [u64; MAX_TOKENS],
    pub borrows: [u64; MAX_TOKENS],
    spot_open_orders: [Pubkey; MAX_PAIRS],
    perp_base_lots: [i64; MAX_PAIRS],
}

impl MarginAccount {
    pub(crate) fn decode(address: Pubkey, data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < MARGIN_ACCOUNT_LEN {
            return Err(DecodeError::TooShort {
                account: "margin account",
                len: data.len(),
                need: MARGIN_ACCOUNT_LEN,
            });
        }
        let mut r = Reader::new("margin account", data);
        let owner = r.pubkey()?;

        let mut deposits = [0u64; MAX_TOKENS];
        for slot in deposits.iter_mut() {
            *slot = r.u64()?;
        }
        let mut borrows = [0u64; MAX_TOKENS];
        for slot in borrows.iter_mut() {
            *slot = r.u64()?;
        }
        let mut spot_open_orders = [Pubkey::default(); MAX_PAIRS];
        for slot in spot_open_orders.iter_mut() {
            *slot = r.pubkey()?;
        }
        let mut perp_base_lots = [0i64; MAX_PAIRS];
        for slot in perp_base_lots.iter_mut() {
            *slot = r.i64()?;
        }

        Ok(Self {
            address,
            owner,
            deposits,
            borrows,
            spot_open_orders,
            perp_base_lots,
        })
    }

    /// Open-orders account for a spot market, `None` when the slot is
    /// unset (the account has never traded that market).
    pub fn spot_open_orders(&self, index: usize) -> Result<Option<Pubkey>, DecodeError> {
        let key = self
            .spot_open_orders
            .get(index)
            .ok_or(DecodeError::IndexOutOfRange {
                account: "margin account",
                index,
                max: MAX_PAIRS,
            })?;
        Ok((*key != Pubkey::default()).then_some(*key))
    }

    pub fn perp_base_lots(&self, index: usize) -> Result<i64, DecodeError> {
        self.perp_base_lots
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfRange {
                account: "margin account",
                index,
                max: MAX_PAIRS,
            })
    }

    pub(crate) fn deposit(&self, index: usize) -> Result<u64, DecodeError> {
        self.deposits
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfRange {
                account: "margin account",
                index,
                max: MAX_TOKENS,
            })
    }

    pub(crate) fn borrow(&self, index: usize) -> Result<u64, DecodeError> {
        self.borrows
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfRange {
                account: "margin account",
                index,
                max: MAX_TOKENS,
            })
    }
}

/// Serum open-orders balances, trimmed to the base-token totals the
/// position math needs. The quote balances and rebates that follow in
/// the buffer are left unread.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenOrdersLayout {
    pub base_free: u64,
    pub base_total: u64,
}

impl OpenOrdersLayout {
    pub(crate) fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < OPEN_ORDERS_LEN {
            return Err(DecodeError::TooShort {
                account: "open orders",
                len: data.len(),
                need: OPEN_ORDERS_LEN,
            });
        }
        let mut r = Reader::new("open orders", data);
        Ok(Self {
            base_free: r.u64()?,
            base_total: r.u64()?,
        })
    }

    /// Base tokens locked in resting orders.
    pub(crate) fn base_locked(&self) -> u64 {
        self.base_total.saturating_sub(self.base_free)
    }
}

/// Group-wide cache of per-token deposit and borrow indices.
#[derive(Debug, Clone)]
pub(crate) struct CacheLayout {
    deposit_indices: [u64; MAX_TOKENS],
    borrow_indices: [u64; MAX_TOKENS],
}

impl CacheLayout {
    pub(crate) fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < CACHE_LEN {
            return Err(DecodeError::TooShort {
                account: "cache",
                len: data.len(),
                need: CACHE_LEN,
            });
        }
        let mut r = Reader::new("cache", data);
        let mut deposit_indices = [0u64; MAX_TOKENS];
        let mut borrow_indices = [0u64; MAX_TOKENS];
        for i in 0..MAX_TOKENS {
            deposit_indices[i] = r.u64()?;
            borrow_indices[i] = r.u64()?;
        }
        Ok(Self {
            deposit_indices,
            borrow_indices,
        })
    }

    pub(crate) fn deposit_index(&self, index: usize) -> Result<Decimal, DecodeError> {
        let raw = self
            .deposit_indices
            .get(index)
            .ok_or(DecodeError::IndexOutOfRange {
                account: "cache",
                index,
                max: MAX_TOKENS,
            })?;
        Ok(Decimal::from(*raw) / Decimal::from(INDEX_SCALE))
    }

    pub(crate) fn borrow_index(&self, index: usize) -> Result<Decimal, DecodeError> {
        let raw = self
            .borrow_indices
            .get(index)
            .ok_or(DecodeError::IndexOutOfRange {
                account: "cache",
                index,
                max: MAX_TOKENS,
            })?;
        Ok(Decimal::from(*raw) / Decimal::from(INDEX_SCALE))
    }
}

#[cfg(test)]
pub(crate) mod test_encode {
    use super::*;

    pub(crate) fn margin_account(
        owner: Pubkey,
        deposits: &[(usize, u64)],
        borrows: &[(usize, u64)],
        spot_open_orders: &[(usize, Pubkey)],
        perp_base_lots: &[(usize, i64)],
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MARGIN_ACCOUNT_LEN);
        buf.extend_from_slice(owner.as_ref());

        let mut dep = [0u64; MAX_TOKENS];
        for (i, v) in deposits {
            dep[*i] = *v;
        }
        let mut bor = [0u64; MAX_TOKENS];
        for (i, v) in borrows {
            bor[*i] = *v;
        }
        for v in dep {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        for v in bor {
            buf.extend_from_slice(&v.to_le_bytes());
        }

        let mut oo = [Pubkey::default(); MAX_PAIRS];
        for (i, k) in spot_open_orders {
            oo[*i] = *k;
        }
        for k in oo {
            buf.extend_from_slice(k.as_ref());
        }

        let mut perp = [0i64; MAX_PAIRS];
        for (i, v) in perp_base_lots {
            perp[*i] = *v;
        }
        for v in perp {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    pub(crate) fn open_orders(
        base_free: u64,
        base_total: u64,
        quote_free: u64,
        quote_total: u64,
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(OPEN_ORDERS_LEN);
        for v in [base_free, base_total, quote_free, quote_total, 0] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    pub(crate) fn cache(indices: &[(usize, u64, u64)]) -> Vec<u8> {
        let mut dep = [INDEX_SCALE; MAX_TOKENS];
        let mut bor = [INDEX_SCALE; MAX_TOKENS];
        for (i, d, b) in indices {
            dep[*i] = *d;
            bor[*i] = *b;
        }
        let mut buf = Vec::with_capacity(CACHE_LEN);
        for i in 0..MAX_TOKENS {
            buf.extend_from_slice(&dep[i].to_le_bytes());
            buf.extend_from_slice(&bor[i].to_le_bytes());
        }
        buf
    }
}
