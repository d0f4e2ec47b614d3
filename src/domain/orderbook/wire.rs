//! Book-side account layout.
//!
//! A book side is a tag byte (0 = bids, 1 = asks), a little-endian entry
//! count, then fixed-width entries of price lots, size lots, the owner
//! key the order books against, and the client order id.

use solana_pubkey::Pubkey;

use crate::domain::layout::Reader;
use crate::error::DecodeError;

pub(crate) const BOOK_SIDE_TAG_BIDS: u8 = 0;
pub(crate) const BOOK_SIDE_TAG_ASKS: u8 = 1;
pub(crate) const BOOK_ENTRY_LEN: usize = 56;

#[derive(Debug, Clone)]
pub(crate) struct BookEntry {
    pub price_lots: u64,
    pub size_lots: u64,
    pub owner: Pubkey,
    pub client_order_id: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct BookSideLayout {
    pub tag: u8,
    pub entries: Vec<BookEntry>,
}

impl BookSideLayout {
    pub(crate) fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new("book side", data);
        let tag = r.u8()?;
        if tag > BOOK_SIDE_TAG_ASKS {
            return Err(DecodeError::BadTag {
                account: "book side",
                tag,
            });
        }
        let count = r.u32()? as usize;
        let need = 5 + count * BOOK_ENTRY_LEN;
        if data.len() < need {
            return Err(DecodeError::TooShort {
                account: "book side",
                len: data.len(),
                need,
            });
        }
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(BookEntry {
                price_lots: r.u64()?,
                size_lots: r.u64()?,
                owner: r.pubkey()?,
                client_order_id: r.u64()?,
            });
        }
        Ok(Self { tag, entries })
    }
}

#[cfg(test)]
pub(crate) fn encode_book_side(tag: u8, entries: &[(u64, u64, Pubkey, u64)]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(5 + entries.len() * BOOK_ENTRY_LEN);
    buf.push(tag);
    buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for (price, size, owner, id) in entries {
        buf.extend_from_slice(&price.to_le_bytes());
        buf.extend_from_slice(&size.to_le_bytes());
        buf.extend_from_slice(owner.as_ref());
        buf.extend_from_slice(&id.to_le_bytes());
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_side_decode() {
        let owner = Pubkey::new_from_array([7; 32]);
        let bytes = encode_book_side(
            BOOK_SIDE_TAG_BIDS,
            &[(1000, 50, owner, 11), (990, 25, owner, 12)],
        );
        let side = BookSideLayout::decode(&bytes).unwrap();
        assert_eq!(side.tag, BOOK_SIDE_TAG_BIDS);
        assert_eq!(side.entries.len(), 2);
        assert_eq!(side.entries[0].price_lots, 1000);
        assert_eq!(side.entries[1].size_lots, 25);
        assert_eq!(side.entries[1].client_order_id, 12);
    }

    #[test]
    fn test_empty_side() {
        let bytes = encode_book_side(BOOK_SIDE_TAG_ASKS, &[]);
        let side = BookSideLayout::decode(&bytes).unwrap();
        assert!(side.entries.is_empty());
    }

    #[test]
    fn test_bad_tag_rejected() {
        let bytes = encode_book_side(2, &[]);
        let err = BookSideLayout::decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::BadTag { tag: 2, .. }));
    }

    #[test]
    fn test_truncated_entries_rejected() {
        let owner = Pubkey::new_from_array([7; 32]);
        let bytes = encode_book_side(BOOK_SIDE_TAG_BIDS, &[(1000, 50, owner, 11)]);
        let err = BookSideLayout::decode(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, DecodeError::TooShort { .. }));
    }
}
