//! Types returned by the `zks_*` namespace.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token bridged between L1 and L2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub l1_address: Address,
    pub l2_address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Merkle proof of an L2 to L1 message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2ToL1MessageProof {
    pub id: u64,
    pub proof: Vec<B256>,
    pub root: B256,
}

/// Default bridge contract addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeContracts {
    pub l1_erc20_default_bridge: Address,
    pub l2_erc20_default_bridge: Address,
    #[serde(default)]
    pub l1_weth_bridge: Option<Address>,
    #[serde(default)]
    pub l2_weth_bridge: Option<Address>,
}

/// Fee estimate from `zks_estimateFee`
///
/// The node reports these fields in snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub gas_per_pubdata_limit: U256,
}

impl Fee {
    /// Upper bound on the fee paid: `gas_limit * max_fee_per_gas`
    pub fn max_total(&self) -> U256 {
        self.gas_limit.saturating_mul(self.max_fee_per_gas)
    }
}

/// L2 block details with its L1 commit/prove/execute progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDetails {
    pub number: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub l1_tx_count: u64,
    #[serde(default)]
    pub l2_tx_count: u64,
    #[serde(default)]
    pub root_hash: Option<B256>,
    pub status: String,
    #[serde(default)]
    pub commit_tx_hash: Option<B256>,
    #[serde(default)]
    pub committed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prove_tx_hash: Option<B256>,
    #[serde(default)]
    pub proven_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub execute_tx_hash: Option<B256>,
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
}

impl BlockDetails {
    /// Block timestamp as a UTC date
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}
