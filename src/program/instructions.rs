//! Instruction builders for the order primitives the bot submits.
//!
//! The bot only ever places and cancels orders; account management and
//! settlement stay with the exchange's own tooling.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::group::{GroupConfig, MarketSpec};
use crate::program::constants::{instruction, CANCEL_ALL_LIMIT};
use crate::program::OrderParams;

/// Create an account meta for a signer+writable account.
fn signer_mut(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only account.
fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

/// Serialize the shared order tail: side, price lots, size lots, type, id.
fn push_order_data(data: &mut Vec<u8>, params: &OrderParams) {
    data.push(params.side.to_wire());
    data.extend_from_slice(&params.price_lots.to_le_bytes());
    data.extend_from_slice(&params.size_lots.to_le_bytes());
    data.push(params.order_type.to_wire());
    data.extend_from_slice(&params.client_order_id.to_le_bytes());
}

/// Build PlaceSpotOrder.
///
/// Accounts:
/// 0. owner (signer, mut)
/// 1. margin_account (mut)
/// 2. market (mut)
/// 3. bids (mut)
/// 4. asks (mut)
/// 5. open_orders (mut) - owner's open-orders account for this market
/// 6. cache (readonly)
/// 7. dex_program (readonly)
pub fn build_place_spot_order_ix(
    group: &GroupConfig,
    spec: &MarketSpec,
    owner: &Pubkey,
    margin_account: &Pubkey,
    open_orders: &Pubkey,
    params: &OrderParams,
) -> Instruction {
    let keys = vec![
        signer_mut(*owner),
        writable(*margin_account),
        writable(spec.market),
        writable(spec.bids),
        writable(spec.asks),
        writable(*open_orders),
        readonly(group.cache),
        readonly(group.dex_program_id),
    ];

    // Data: [discriminator, side(1), price_lots(8), size_lots(8), type(1), client_id(8)]
    let mut data = Vec::with_capacity(27);
    data.push(instruction::PLACE_SPOT_ORDER);
    push_order_data(&mut data, params);

    Instruction {
        program_id: group.program_id,
        accounts: keys,
        data,
    }
}

/// Build PlacePerpOrder.
///
/// Accounts:
/// 0. owner (signer, mut)
/// 1. margin_account (mut)
/// 2. market (mut)
/// 3. bids (mut)
/// 4. asks (mut)
/// 5. cache (readonly)
pub fn build_place_perp_order_ix(
    group: &GroupConfig,
    spec: &MarketSpec,
    owner: &Pubkey,
    margin_account: &Pubkey,
    params: &OrderParams,
) -> Instruction {
    let keys = vec![
        signer_mut(*owner),
        writable(*margin_account),
        writable(spec.market),
        writable(spec.bids),
        writable(spec.asks),
        readonly(group.cache),
    ];

    let mut data = Vec::with_capacity(27);
    data.push(instruction::PLACE_PERP_ORDER);
    push_order_data(&mut data, params);

    Instruction {
        program_id: group.program_id,
        accounts: keys,
        data,
    }
}

/// Build CancelAllOrders.
///
/// Removes up to [`CANCEL_ALL_LIMIT`] of the owner's resting orders in one
/// market; already-filled orders are skipped by the program.
///
/// Accounts:
/// 0. owner (signer, mut)
/// 1. margin_account (mut)
/// 2. market (mut)
/// 3. bids (mut)
/// 4. asks (mut)
pub fn build_cancel_all_ix(
    group: &GroupConfig,
    spec: &MarketSpec,
    owner: &Pubkey,
    margin_account: &Pubkey,
) -> Instruction {
    let keys = vec![
        signer_mut(*owner),
        writable(*margin_account),
        writable(spec.market),
        writable(spec.bids),
        writable(spec.asks),
    ];

    let data = vec![instruction::CANCEL_ALL_ORDERS, CANCEL_ALL_LIMIT];

    Instruction {
        program_id: group.program_id,
        accounts: keys,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{OrderType, Side};

    fn test_group() -> GroupConfig {
        GroupConfig::load("mainnet.1").unwrap()
    }

    fn test_params() -> OrderParams {
        OrderParams {
            side: Side::Sell,
            price_lots: 505,
            size_lots: 12,
            order_type: OrderType::PostOnly,
            client_order_id: 42,
        }
    }

    #[test]
    fn test_build_place_spot_order_ix() {
        let group = test_group();
        let spec = group.market("BTC/USDC").unwrap();
        let owner = Pubkey::new_unique();
        let margin = Pubkey::new_unique();
        let open_orders = Pubkey::new_unique();

        let ix = build_place_spot_order_ix(&group, spec, &owner, &margin, &open_orders, &test_params());

        assert_eq!(ix.program_id, group.program_id);
        assert_eq!(ix.accounts.len(), 8);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.data.len(), 27); // 1 + 1 + 8 + 8 + 1 + 8
        assert_eq!(ix.data[0], instruction::PLACE_SPOT_ORDER);
        assert_eq!(ix.data[1], 1); // sell
        assert_eq!(&ix.data[2..10], &505u64.to_le_bytes());
        assert_eq!(ix.data[18], 2); // postOnly
    }

    #[test]
    fn test_build_place_perp_order_ix() {
        let group = test_group();
        let spec = group.market("BTC-PERP").unwrap();
        let owner = Pubkey::new_unique();
        let margin = Pubkey::new_unique();

        let ix = build_place_perp_order_ix(&group, spec, &owner, &margin, &test_params());

        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.data.len(), 27);
        assert_eq!(ix.data[0], instruction::PLACE_PERP_ORDER);
        assert_eq!(&ix.data[19..27], &42u64.to_le_bytes());
    }

    #[test]
    fn test_build_cancel_all_ix() {
        let group = test_group();
        let spec = group.market("ETH-PERP").unwrap();
        let owner = Pubkey::new_unique();
        let margin = Pubkey::new_unique();

        let ix = build_cancel_all_ix(&group, spec, &owner, &margin);

        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(ix.data, vec![instruction::CANCEL_ALL_ORDERS, CANCEL_ALL_LIMIT]);
    }
}
