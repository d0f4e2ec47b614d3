//! In-memory provider doubles for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_pubkey::Pubkey;

use crate::context::TradeContext;
use crate::error::Error;
use crate::group::{GroupConfig, MarketSpec};
use crate::oracle::PriceOracle;
use crate::program::OrderParams;
use crate::provider::{AccountFetcher, TradeGateway};

/// Account store that counts batched fetch calls.
#[derive(Default)]
pub(crate) struct MockFetcher {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    fetches: AtomicUsize,
}

impl MockFetcher {
    pub(crate) fn insert(&self, key: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(key, data);
    }

    pub(crate) fn calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountFetcher for MockFetcher {
    async fn fetch_multiple(&self, keys: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock().unwrap();
        Ok(keys.iter().map(|key| accounts.get(key).cloned()).collect())
    }

    async fn margin_accounts_for_owner(&self, _owner: &Pubkey) -> Result<Vec<Pubkey>, Error> {
        Ok(vec![])
    }
}

/// Gateway that records submissions and hands back canned signatures.
#[derive(Default)]
pub(crate) struct MockGateway {
    spot_orders: Mutex<Vec<OrderParams>>,
    perp_orders: Mutex<Vec<OrderParams>>,
    cancelled: Mutex<Vec<String>>,
}

impl MockGateway {
    pub(crate) fn spot_orders(&self) -> Vec<OrderParams> {
        self.spot_orders.lock().unwrap().clone()
    }

    pub(crate) fn perp_orders(&self) -> Vec<OrderParams> {
        self.perp_orders.lock().unwrap().clone()
    }

    pub(crate) fn cancelled(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl TradeGateway for MockGateway {
    async fn place_spot_order(
        &self,
        _spec: &MarketSpec,
        _margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error> {
        self.spot_orders.lock().unwrap().push(*params);
        Ok("spot-signature".to_string())
    }

    async fn place_perp_order(
        &self,
        _spec: &MarketSpec,
        _margin_account: &Pubkey,
        params: &OrderParams,
    ) -> Result<String, Error> {
        self.perp_orders.lock().unwrap().push(*params);
        Ok("perp-signature".to_string())
    }

    async fn cancel_all_orders(
        &self,
        spec: &MarketSpec,
        _margin_account: &Pubkey,
    ) -> Result<String, Error> {
        self.cancelled.lock().unwrap().push(spec.name.clone());
        Ok("cancel-signature".to_string())
    }
}

pub(crate) fn test_context(fetcher: Arc<MockFetcher>) -> TradeContext {
    test_context_with(fetcher, Arc::new(MockGateway::default()))
}

pub(crate) fn test_context_with(
    fetcher: Arc<MockFetcher>,
    gateway: Arc<MockGateway>,
) -> TradeContext {
    let group = GroupConfig::load("mainnet.1").unwrap();
    TradeContext::with_providers(
        group,
        Pubkey::new_from_array([1; 32]),
        Pubkey::new_from_array([2; 32]),
        fetcher,
        gateway,
        PriceOracle::new("http://localhost:0"),
    )
}
