//! Block tags, headers and blocks.

use alloy_primitives::{B256, U256, U64};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Block selector accepted by `eth_*` methods
///
/// **Public** - serialized as a tag string or a hex quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockNumber {
    Earliest,
    #[default]
    Latest,
    Pending,
    /// Sealed by the sequencer and committed to L1
    Committed,
    /// Executed on L1
    Finalized,
    Number(u64),
}

impl From<u64> for BlockNumber {
    fn from(number: u64) -> Self {
        BlockNumber::Number(number)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumber::Earliest => f.write_str("earliest"),
            BlockNumber::Latest => f.write_str("latest"),
            BlockNumber::Pending => f.write_str("pending"),
            BlockNumber::Committed => f.write_str("committed"),
            BlockNumber::Finalized => f.write_str("finalized"),
            BlockNumber::Number(n) => write!(f, "{:#x}", n),
        }
    }
}

impl FromStr for BlockNumber {
    type Err = String;

    /// Accepts a tag, a decimal number or a `0x` hex quantity
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "earliest" => Ok(BlockNumber::Earliest),
            "latest" => Ok(BlockNumber::Latest),
            "pending" => Ok(BlockNumber::Pending),
            "committed" => Ok(BlockNumber::Committed),
            "finalized" => Ok(BlockNumber::Finalized),
            other => {
                let parsed = match other.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => other.parse::<u64>(),
                };
                parsed
                    .map(BlockNumber::Number)
                    .map_err(|e| format!("invalid block number '{}': {}", s, e))
            }
        }
    }
}

impl Serialize for BlockNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Block header
///
/// Only `number` is required; the finalized-block poll compares it against
/// the receipt's block number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub number: U64,
    #[serde(default)]
    pub hash: Option<B256>,
    #[serde(default)]
    pub parent_hash: B256,
    #[serde(default)]
    pub timestamp: U64,
}

/// Block with transaction hashes and zkSync batch info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: U64,
    #[serde(default)]
    pub hash: Option<B256>,
    #[serde(default)]
    pub parent_hash: B256,
    #[serde(default)]
    pub timestamp: U64,
    #[serde(default)]
    pub gas_limit: U256,
    #[serde(default)]
    pub gas_used: U256,
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub transactions: Vec<B256>,
    /// L1 batch containing this block, absent while the batch is open
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_timestamp: Option<U64>,
}
