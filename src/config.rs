//! Environment configuration.
//!
//! Everything is read from process env vars (a `.env` file is loaded by
//! the binary before this runs).

use std::time::Duration;

use solana_keypair::Keypair;
use solana_pubkey::Pubkey;

use crate::error::Error;
use crate::oracle::DEFAULT_EVENT_HISTORY_URL;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_GROUP: &str = "mainnet.1";

/// Bot configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Env {
    pub rpc_url: String,
    pub private_key_base58: String,
    pub group: String,
    /// Skips margin-account discovery when set.
    pub margin_account: Option<Pubkey>,
    pub event_history_url: String,
}

impl Env {
    pub fn load() -> Result<Self, Error> {
        let private_key_base58 = std::env::var("PRIVATE_KEY_BASE58")
            .map_err(|_| Error::Config("PRIVATE_KEY_BASE58 is not set".to_string()))?;
        let margin_account = match std::env::var("MANGO_ACCOUNT_PK") {
            Ok(raw) => Some(raw.parse::<Pubkey>().map_err(|e| {
                Error::Config(format!("MANGO_ACCOUNT_PK is not a valid pubkey: {e}"))
            })?),
            Err(_) => None,
        };
        Ok(Self {
            rpc_url: std::env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            private_key_base58,
            group: std::env::var("GROUP").unwrap_or_else(|_| DEFAULT_GROUP.to_string()),
            margin_account,
            event_history_url: std::env::var("EVENT_HISTORY_URL")
                .unwrap_or_else(|_| DEFAULT_EVENT_HISTORY_URL.to_string()),
        })
    }

    pub fn keypair(&self) -> Result<Keypair, Error> {
        let bytes = bs58::decode(&self.private_key_base58)
            .into_vec()
            .map_err(|e| Error::Config(format!("PRIVATE_KEY_BASE58 is not valid base58: {e}")))?;
        Keypair::try_from(bytes.as_slice())
            .map_err(|e| Error::Config(format!("PRIVATE_KEY_BASE58 is not a valid keypair: {e}")))
    }
}

/// Parse an interval like `500ms`, `30s`, `5m`, or `2h`. A bare number
/// is taken as seconds.
pub fn parse_interval(raw: &str) -> Result<Duration, Error> {
    let raw = raw.trim();
    let (digits, unit): (&str, fn(u64) -> Duration) = if let Some(n) = raw.strip_suffix("ms") {
        (n, Duration::from_millis)
    } else if let Some(n) = raw.strip_suffix('s') {
        (n, Duration::from_secs)
    } else if let Some(n) = raw.strip_suffix('m') {
        (n, |m| Duration::from_secs(m * 60))
    } else if let Some(n) = raw.strip_suffix('h') {
        (n, |h| Duration::from_secs(h * 3600))
    } else {
        (raw, Duration::from_secs)
    };
    let value: u64 = digits
        .parse()
        .map_err(|_| Error::Config(format!("invalid interval: {raw}")))?;
    if value == 0 {
        return Err(Error::Config("interval must be positive".to_string()));
    }
    Ok(unit(value))
}
