//! Transactions, call requests and receipts.

use super::log::Log;
use alloy_primitives::{Address, Bytes, TxHash, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Call request used for gas and fee estimation
///
/// **Public** - serialized as the first positional param of
/// `eth_estimateGas` / `zks_estimateFee`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(rename = "eip712Meta", skip_serializing_if = "Option::is_none")]
    pub eip712_meta: Option<Eip712Meta>,
}

impl Transaction {
    /// Call from `from` to `to` with calldata `data`
    pub fn call(from: Address, to: Address, data: Bytes) -> Self {
        Self {
            from,
            to: Some(to),
            data: Some(data),
            ..Self::default()
        }
    }

    /// Set transferred value
    ///
    /// **Public** - builder pattern
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach zkSync EIP-712 metadata
    ///
    /// **Public** - builder pattern
    pub fn with_eip712_meta(mut self, meta: Eip712Meta) -> Self {
        self.eip712_meta = Some(meta);
        self
    }
}

/// zkSync-specific transaction metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_per_pubdata: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_signature: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factory_deps: Vec<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paymaster_params: Option<PaymasterParams>,
}

/// Paymaster address and its input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterParams {
    pub paymaster: Address,
    pub paymaster_input: Bytes,
}

/// Transaction as returned by `eth_getTransactionByHash`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub hash: TxHash,
    #[serde(default)]
    pub nonce: U256,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub gas: U256,
    #[serde(default)]
    pub input: Bytes,
    #[serde(default)]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub chain_id: Option<U256>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_tx_index: Option<U64>,
}

/// Log emitted for L2 to L1 communication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2ToL1Log {
    #[serde(default)]
    pub block_number: U64,
    #[serde(default)]
    pub block_hash: B256,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: U64,
    #[serde(default)]
    pub shard_id: U64,
    #[serde(default)]
    pub is_service: bool,
    pub sender: Address,
    pub key: B256,
    pub value: B256,
    #[serde(default)]
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub log_index: U64,
}

/// Transaction receipt
///
/// A receipt without `block_number` belongs to a transaction that has not
/// been mined yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub cumulative_gas_used: U256,
    #[serde(default)]
    pub gas_used: Option<U256>,
    #[serde(default)]
    pub effective_gas_price: Option<U256>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub logs: Vec<Log>,
    /// 1 for success, 0 for failure
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_tx_index: Option<U64>,
    #[serde(default, rename = "l2ToL1Logs")]
    pub l2_to_l1_logs: Vec<L2ToL1Log>,
}

impl TransactionReceipt {
    /// True once the receipt carries a block number
    pub fn is_mined(&self) -> bool {
        self.block_number.is_some()
    }

    /// True when the node reports successful execution
    pub fn is_success(&self) -> bool {
        self.status == Some(U64::from(1))
    }
}
