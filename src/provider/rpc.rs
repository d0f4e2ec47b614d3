//! RPC-backed provider: batched account reads and signed transaction
//! submission against a Solana JSON-RPC node.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcProgramAccountsConfig;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_commitment_config::CommitmentConfig;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::domain::position::wire::MARGIN_ACCOUNT_LEN;
use crate::domain::position::MarginAccount;
use crate::error::Error;
use crate::group::{GroupConfig, MarketSpec};
use crate::program::instructions::{
    build_cancel_all_ix, build_place_perp_order_ix, build_place_spot_order_ix,
};
use crate::program::OrderParams;

use super::{AccountFetcher, TradeGateway};

/// Provider over a JSON-RPC node, reading at processed commitment.
pub struct RpcProvider {
    rpc: RpcClient,
    group: GroupConfig,
    keypair: Keypair,
}

impl RpcProvider {
    pub fn new(rpc_url: &str, group: GroupConfig, keypair: Keypair) -> Self {
        let rpc = RpcClient::new_with_commitment(
            rpc_url.to_string(),
            CommitmentConfig::processed(),
        );
        Self {
            rpc,
            group,
            keypair,
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn send(&self, instruction: Instruction) -> Result<String, Error> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| Error::Submit(e.to_string()))?;
        let tx = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.keypair.pubkey()),
            &[&self.keypair],
            blockhash,
        );
        let signature = self
            .rpc
            .send_transaction(&tx)
            .await
            .map_err(|e| Error::Submit(e.to_string()))?;
        Ok(signature.to_string())
    }

    /// Open-orders account for a spot market, default key when the slot
    /// is unset and the program should create it.
    async fn resolve_open_orders(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
    ) -> Result<Pubkey, Error> {
        let accounts = self.fetch_multiple(&[*margin_account]).await?;
        let data = accounts
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| Error::AccountFetch("margin account missing".to_string()))?;
        let margin = MarginAccount::decode(*margin_account, &data)?;
        Ok(margin
            .spot_open_orders(spec.market_index)?
            .unwrap_or_default())
    }
}

#[async_trait]
impl AccountFetcher for RpcProvider {
    async fn fetch_multiple(&self, keys: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>, Error> {
        let accounts = self
            .rpc
            .get_multiple_accounts(keys)
            .await
            .map_err(|e| Error::AccountFetch(e.to_string()))?;
        Ok(accounts
            .into_iter()
            .map(|account| account.map(|a| a.data))
            .collect())
    }

    async fn margin_accounts_for_owner(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, Error> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(MARGIN_ACCOUNT_LEN as u64),
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(0, owner.as_ref())),
            ]),
            ..Default::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.group.program_id, config)
            .await
            .map_err(|e| Error::AccountDiscovery(e.to_string()))?;
        Ok(accounts.into_iter().map(|(key, _)| key).collect())
    }
}

#[async_trait]
impl TradeGateway for RpcProvider {
    async fn place_spot_order(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error> {
        let open_orders = self.resolve_open_orders(spec, margin_account).await?;
        let ix = build_place_spot_order_ix(
            &self.group,
            spec,
            &self.owner(),
            margin_account,
            &open_orders,
            params,
        );
        self.send(ix).await
    }

    async fn place_perp_order(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error> {
        let ix =
            build_place_perp_order_ix(&self.group, spec, &self.owner(), margin_account, params);
        self.send(ix).await
    }

    async fn cancel_all_orders(
        &self,
        spec: &MarketSpec,
        margin_account: &Pubkey,
    ) -> Result<String, Error> {
        let ix = build_cancel_all_ix(&self.group, spec, &self.owner(), margin_account);
        self.send(ix).await
    }
}
