//! Static group configuration — market names, identifiers, decimals.
//!
//! The group list is bundled with the binary (`ids.json`), the same way the
//! upstream exchange ships its id registry. Market-name validation against
//! this list happens before any network call.

use std::str::FromStr;

use serde::Deserialize;
use solana_pubkey::Pubkey;

use crate::error::Error;

const IDS_JSON: &str = include_str!("ids.json");

// ─── MarketKind ──────────────────────────────────────────────────────────────

/// Whether a market settles spot token balances or a perp base position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    Spot,
    Perp,
}

impl MarketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketKind::Spot => "spot",
            MarketKind::Perp => "perp",
        }
    }
}

// ─── Config types ────────────────────────────────────────────────────────────

/// Static identity of one market within a group.
#[derive(Debug, Clone)]
pub struct MarketSpec {
    pub name: String,
    pub kind: MarketKind,
    pub market: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    /// Index into the margin account's per-market sub-records. For spot
    /// markets this doubles as the base token index.
    pub market_index: usize,
    pub base_decimals: u8,
    pub quote_decimals: u8,
}

/// One exchange group: program ids plus its configured markets.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    pub name: String,
    pub program_id: Pubkey,
    pub dex_program_id: Pubkey,
    pub cache: Pubkey,
    pub markets: Vec<MarketSpec>,
}

impl GroupConfig {
    /// Load a group by name from the bundled id registry.
    pub fn load(group_name: &str) -> Result<Self, Error> {
        let ids: IdsFile = serde_json::from_str(IDS_JSON)
            .map_err(|e| Error::Config(format!("bundled ids.json is invalid: {e}")))?;
        let raw = ids
            .groups
            .into_iter()
            .find(|g| g.name == group_name)
            .ok_or_else(|| Error::Config(format!("no group named {group_name} in ids.json")))?;
        raw.try_into()
    }

    /// Resolve a market name, failing fast for names outside the group.
    pub fn market(&self, name: &str) -> Result<&MarketSpec, Error> {
        self.markets
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| Error::UnknownMarket(name.to_string()))
    }

    pub fn market_names(&self) -> impl Iterator<Item = &str> {
        self.markets.iter().map(|m| m.name.as_str())
    }
}

// ─── Wire ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct IdsFile {
    groups: Vec<RawGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroup {
    name: String,
    program_id: String,
    dex_program_id: String,
    cache: String,
    markets: Vec<RawMarket>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarket {
    name: String,
    kind: MarketKind,
    market: String,
    bids: String,
    asks: String,
    market_index: usize,
    base_decimals: u8,
    quote_decimals: u8,
}

fn parse_key(field: &str, value: &str) -> Result<Pubkey, Error> {
    Pubkey::from_str(value).map_err(|e| Error::Config(format!("bad pubkey for {field}: {e}")))
}

impl TryFrom<RawGroup> for GroupConfig {
    type Error = Error;

    fn try_from(raw: RawGroup) -> Result<Self, Error> {
        let markets = raw
            .markets
            .into_iter()
            .map(|m| {
                Ok(MarketSpec {
                    market: parse_key(&m.name, &m.market)?,
                    bids: parse_key(&m.name, &m.bids)?,
                    asks: parse_key(&m.name, &m.asks)?,
                    name: m.name,
                    kind: m.kind,
                    market_index: m.market_index,
                    base_decimals: m.base_decimals,
                    quote_decimals: m.quote_decimals,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(GroupConfig {
            program_id: parse_key("programId", &raw.program_id)?,
            dex_program_id: parse_key("dexProgramId", &raw.dex_program_id)?,
            cache: parse_key("cache", &raw.cache)?,
            name: raw.name,
            markets,
        })
    }
}
