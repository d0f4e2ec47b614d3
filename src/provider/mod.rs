//! Provider boundary — the traits the domain layers talk to.
//!
//! Domain code never touches the RPC client directly. It reads raw
//! account bytes through [`AccountFetcher`] and submits transactions
//! through [`TradeGateway`], so the whole trading flow can run against
//! in-memory doubles in tests.

pub mod rpc;

pub use rpc::RpcProvider;

use async_trait::async_trait;
use solana_pubkey::Pubkey;

use crate::error::Error;
use crate::group::MarketSpec;
use crate::program::OrderParams;

/// Read-side access to on-chain accounts.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    /// Fetch raw account data for each key in one batched call.
    /// `None` entries are accounts that do not exist.
    async fn fetch_multiple(&self, keys: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>, Error>;

    /// All margin accounts owned by a wallet.
    async fn margin_accounts_for_owner(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, Error>;
}

/// Write-side access: signs and submits program instructions.
///
/// Each method returns the transaction signature as a string.
#[async_trait]
pub trait TradeGateway: Send + Sync {
    async fn place_spot_order(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error>;

    async fn place_perp_order(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error>;

    async fn cancel_all_orders(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
    ) -> Result<String, Error>;
}
