//! Event logs and log filters.

use super::block::BlockNumber;
use crate::utils::error::ProviderError;
use alloy_primitives::{Address, Bytes, TxHash, B256, U64};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Event log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub transaction_hash: Option<TxHash>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    #[serde(default)]
    pub log_index: Option<U64>,
    #[serde(default)]
    pub removed: bool,
}

/// Log filter for `eth_getLogs`
///
/// **Public** - either `block_hash` or a block range may be set, not both
///
/// Each entry of `topics` lists the accepted values for that position; an
/// empty entry matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub block_hash: Option<B256>,
    pub from_block: Option<BlockNumber>,
    pub to_block: Option<BlockNumber>,
    pub addresses: Vec<Address>,
    pub topics: Vec<Vec<B256>>,
}

impl FilterQuery {
    /// Empty filter (all logs from genesis to latest)
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a block range
    ///
    /// **Public** - builder pattern
    pub fn with_range(mut self, from: BlockNumber, to: BlockNumber) -> Self {
        self.from_block = Some(from);
        self.to_block = Some(to);
        self
    }

    /// Restrict to a single block
    ///
    /// **Public** - builder pattern
    pub fn with_block_hash(mut self, hash: B256) -> Self {
        self.block_hash = Some(hash);
        self
    }

    /// Restrict to logs emitted by `address`
    ///
    /// **Public** - builder pattern
    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Append a topic position accepting any of `values`
    ///
    /// **Public** - builder pattern
    pub fn with_topic(mut self, values: Vec<B256>) -> Self {
        self.topics.push(values);
        self
    }

    /// Build the JSON filter object sent to the node
    ///
    /// # Errors
    /// `ProviderError::InvalidFilter` when both a block hash and a range are set
    pub fn to_filter_arg(&self) -> Result<Value, ProviderError> {
        let mut arg = Map::new();
        arg.insert("address".to_string(), json!(self.addresses));

        let topics: Vec<Value> = self
            .topics
            .iter()
            .map(|position| {
                if position.is_empty() {
                    Value::Null
                } else {
                    json!(position)
                }
            })
            .collect();
        arg.insert("topics".to_string(), Value::Array(topics));

        match self.block_hash {
            Some(hash) => {
                if self.from_block.is_some() || self.to_block.is_some() {
                    return Err(ProviderError::InvalidFilter(
                        "cannot specify both BlockHash and FromBlock/ToBlock".to_string(),
                    ));
                }
                arg.insert("blockHash".to_string(), json!(hash));
            }
            None => {
                let from = self.from_block.unwrap_or(BlockNumber::Number(0));
                let to = self.to_block.unwrap_or(BlockNumber::Latest);
                arg.insert("fromBlock".to_string(), json!(from));
                arg.insert("toBlock".to_string(), json!(to));
            }
        }

        Ok(Value::Object(arg))
    }
}
