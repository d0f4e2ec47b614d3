//! Trading context — the explicit bundle of everything a command needs.
//!
//! Built once at startup and passed by reference. Domain access goes
//! through the borrowing sub-clients ([`registry`](TradeContext::registry),
//! [`books`](TradeContext::books), and friends) rather than free
//! functions over global state.

use std::sync::Arc;

use solana_pubkey::Pubkey;
use solana_signer::Signer;
use tracing::{info, warn};

use crate::config::Env;
use crate::domain::execution::{Canceller, Engine};
use crate::domain::market::Registry;
use crate::domain::orderbook::Books;
use crate::domain::position::{MarginAccount, Positions};
use crate::error::Error;
use crate::group::GroupConfig;
use crate::oracle::{Oracle, PriceOracle};
use crate::provider::{AccountFetcher, RpcProvider, TradeGateway};

pub struct TradeContext {
    pub group: GroupConfig,
    pub owner: Pubkey,
    pub margin_account: Pubkey,
    pub(crate) fetcher: Arc<dyn AccountFetcher>,
    pub(crate) gateway: Arc<dyn TradeGateway>,
    pub(crate) prices: PriceOracle,
}

impl TradeContext {
    /// Connect to the cluster and resolve the margin account.
    ///
    /// An explicitly configured margin account wins; otherwise the
    /// owner's accounts are scanned and the first by pubkey order is
    /// used.
    pub async fn connect(env: &Env) -> Result<Self, Error> {
        let group = GroupConfig::load(&env.group)?;
        let keypair = env.keypair()?;
        let owner = keypair.pubkey();
        let provider = Arc::new(RpcProvider::new(&env.rpc_url, group.clone(), keypair));

        let margin_account = match env.margin_account {
            Some(key) => key,
            None => discover_margin_account(provider.as_ref(), &owner).await?,
        };
        info!(%owner, %margin_account, group = %group.name, "trading context ready");

        Ok(Self {
            group,
            owner,
            margin_account,
            fetcher: provider.clone(),
            gateway: provider,
            prices: PriceOracle::new(&env.event_history_url),
        })
    }

    /// Assemble a context from pre-built providers. Test seam.
    pub fn with_providers(
        group: GroupConfig,
        owner: Pubkey,
        margin_account: Pubkey,
        fetcher: Arc<dyn AccountFetcher>,
        gateway: Arc<dyn TradeGateway>,
        prices: PriceOracle,
    ) -> Self {
        Self {
            group,
            owner,
            margin_account,
            fetcher,
            gateway,
            prices,
        }
    }

    pub fn registry(&self) -> Registry<'_> {
        Registry { ctx: self }
    }

    pub fn books(&self) -> Books<'_> {
        Books { ctx: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { ctx: self }
    }

    pub fn engine(&self) -> Engine<'_> {
        Engine { ctx: self }
    }

    pub fn canceller(&self) -> Canceller<'_> {
        Canceller { ctx: self }
    }

    pub fn oracle(&self) -> Oracle<'_> {
        Oracle { ctx: self }
    }

    /// Fetch and decode the context's margin account.
    pub async fn margin_account_state(&self) -> Result<MarginAccount, Error> {
        let accounts = self.fetcher.fetch_multiple(&[self.margin_account]).await?;
        let data = accounts
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| Error::AccountFetch("margin account missing".to_string()))?;
        Ok(MarginAccount::decode(self.margin_account, &data)?)
    }
}

async fn discover_margin_account(
    fetcher: &dyn AccountFetcher,
    owner: &Pubkey,
) -> Result<Pubkey, Error> {
    let mut accounts = fetcher.margin_accounts_for_owner(owner).await?;
    if accounts.is_empty() {
        return Err(Error::AccountDiscovery(format!(
            "no margin accounts found for owner {owner}"
        )));
    }
    accounts.sort_by_key(|key| key.to_string());
    if accounts.len() > 1 {
        warn!(
            owner = %owner,
            candidates = ?accounts,
            "multiple margin accounts found, using the first"
        );
    }
    Ok(accounts[0])
}
