//! `Provider` implementation backed by a JSON-RPC transport.

use super::Provider;
use crate::rpc::{RpcClient, Transport};
use crate::types::{
    Block, BlockDetails, BlockHeader, BlockNumber, BridgeContracts, Fee, FilterQuery,
    L2ToL1MessageProof, Log, Token, Transaction, TransactionReceipt, TransactionResponse,
};
use crate::utils::config::{ProviderConfig, DEFAULT_POLL_INTERVAL};
use crate::utils::error::{ProviderError, RpcError, WaitError};
use crate::utils::hex::decode_quantity;
use crate::waiter::{self, CancelToken, ConfirmationSource};
use alloy_primitives::{hex, Address, TxHash, B256, U256};
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

/// Provider over any `Transport` (HTTP `RpcClient` by default)
///
/// The transport is an internal capability; only the `Provider` operations
/// are exposed.
pub struct DefaultProvider<T = RpcClient> {
    transport: T,
    poll_interval: Duration,
}

impl DefaultProvider<RpcClient> {
    /// Connect to `rpc_url` over HTTP with default settings
    ///
    /// # Errors
    /// Returns `RpcError::InvalidUrl` for a malformed URL
    pub fn new(rpc_url: impl AsRef<str>) -> Result<Self, RpcError> {
        Ok(Self::with_transport(RpcClient::new(rpc_url)?))
    }

    /// Connect using a full configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, RpcError> {
        let client = RpcClient::with_timeout(&config.rpc_url, config.timeout)?;
        debug!("Using RPC endpoint {} (timeout {:?})", client.url(), config.timeout);
        Ok(Self::with_transport(client).with_poll_interval(config.poll_interval))
    }
}

impl<T: Transport> DefaultProvider<T> {
    /// Wrap an existing transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set confirmation poll interval
    ///
    /// **Public** - builder pattern
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Interval between confirmation polls
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Call `method` and decode its result
    ///
    /// **Private** - every transport failure is tagged with the method name
    async fn call<R>(&self, method: &'static str, params: Value) -> Result<R, ProviderError>
    where
        R: DeserializeOwned + Send,
    {
        let raw = self
            .transport
            .request(method, params)
            .await
            .map_err(|source| ProviderError::Rpc { method, source })?;

        serde_json::from_value(raw).map_err(|e| ProviderError::Decode {
            method,
            reason: e.to_string(),
        })
    }

    /// Call a lookup where a `null` result means "not found"
    ///
    /// **Private** - internal helper
    async fn call_optional<R>(
        &self,
        method: &'static str,
        params: Value,
        what: &'static str,
    ) -> Result<R, ProviderError>
    where
        R: DeserializeOwned + Send,
    {
        self.call::<Option<R>>(method, params)
            .await?
            .ok_or(ProviderError::NotFound(what))
    }

    /// Call a method returning a hex quantity
    ///
    /// **Private** - internal helper
    async fn call_quantity(&self, method: &'static str, params: Value) -> Result<U256, ProviderError> {
        let raw: String = self.call(method, params).await?;
        decode_quantity(&raw).map_err(|e| ProviderError::Decode {
            method,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl<T: Transport> ConfirmationSource for DefaultProvider<T> {
    async fn fetch_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ProviderError> {
        self.get_transaction_receipt(tx_hash).await
    }

    async fn fetch_finalized_header(&self) -> Result<BlockHeader, ProviderError> {
        self.call_optional(
            "eth_getBlockByNumber",
            json!([BlockNumber::Finalized, false]),
            "finalized block",
        )
        .await
    }
}

#[async_trait]
impl<T: Transport> Provider for DefaultProvider<T> {
    async fn get_balance(&self, address: Address, block: BlockNumber) -> Result<U256, ProviderError> {
        self.call_quantity("eth_getBalance", json!([address, block])).await
    }

    async fn get_block_by_number(&self, block: BlockNumber) -> Result<Block, ProviderError> {
        self.call_optional("eth_getBlockByNumber", json!([block, false]), "block")
            .await
    }

    async fn get_block_by_hash(&self, hash: B256) -> Result<Block, ProviderError> {
        self.call_optional("eth_getBlockByHash", json!([hash, false]), "block")
            .await
    }

    async fn get_transaction_count(
        &self,
        address: Address,
        block: BlockNumber,
    ) -> Result<U256, ProviderError> {
        self.call_quantity("eth_getTransactionCount", json!([address, block]))
            .await
    }

    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ProviderError> {
        self.call_optional(
            "eth_getTransactionReceipt",
            json!([tx_hash]),
            "transaction receipt",
        )
        .await
    }

    async fn get_transaction(&self, tx_hash: TxHash) -> Result<TransactionResponse, ProviderError> {
        self.call_optional("eth_getTransactionByHash", json!([tx_hash]), "transaction")
            .await
    }

    async fn wait_mined(&self, tx_hash: TxHash, cancel: &CancelToken) -> Result<TransactionReceipt, WaitError> {
        waiter::wait_mined(self, tx_hash, cancel, self.poll_interval).await
    }

    async fn wait_finalized(
        &self,
        tx_hash: TxHash,
        cancel: &CancelToken,
    ) -> Result<TransactionReceipt, WaitError> {
        waiter::wait_finalized(self, tx_hash, cancel, self.poll_interval).await
    }

    async fn estimate_gas(&self, tx: &Transaction) -> Result<U256, ProviderError> {
        self.call_quantity("eth_estimateGas", json!([tx, BlockNumber::Latest]))
            .await
    }

    async fn get_gas_price(&self) -> Result<U256, ProviderError> {
        self.call_quantity("eth_gasPrice", json!([])).await
    }

    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<TxHash, ProviderError> {
        let tx_hash: TxHash = self
            .call("eth_sendRawTransaction", json!([hex::encode_prefixed(tx)]))
            .await?;
        debug!("Submitted transaction {}", tx_hash);
        Ok(tx_hash)
    }

    async fn get_main_contract(&self) -> Result<Address, ProviderError> {
        self.call("zks_getMainContract", json!([])).await
    }

    async fn l1_chain_id(&self) -> Result<U256, ProviderError> {
        self.call_quantity("zks_L1ChainId", json!([])).await
    }

    async fn l1_batch_number(&self) -> Result<U256, ProviderError> {
        self.call_quantity("zks_L1BatchNumber", json!([])).await
    }

    async fn get_confirmed_tokens(&self, from: u32, limit: u8) -> Result<Vec<Token>, ProviderError> {
        let tokens: Option<Vec<Token>> = self
            .call("zks_getConfirmedTokens", json!([from, limit]))
            .await?;
        Ok(tokens.unwrap_or_default())
    }

    async fn is_token_liquid(&self, token: Address) -> Result<bool, ProviderError> {
        self.call("zks_isTokenLiquid", json!([token])).await
    }

    async fn get_token_price(&self, token: Address) -> Result<Decimal, ProviderError> {
        const METHOD: &str = "zks_getTokenPrice";
        let raw: String = self.call(METHOD, json!([token])).await?;

        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|e| ProviderError::Decode {
                method: METHOD,
                reason: format!("'{}' is not a decimal: {}", raw, e),
            })
    }

    async fn get_l2_to_l1_log_proof(
        &self,
        tx_hash: TxHash,
        log_index: u64,
    ) -> Result<L2ToL1MessageProof, ProviderError> {
        self.call_optional(
            "zks_getL2ToL1LogProof",
            json!([tx_hash, log_index]),
            "L2 to L1 log proof",
        )
        .await
    }

    async fn get_l2_to_l1_msg_proof(
        &self,
        block: u32,
        sender: Address,
        msg: B256,
    ) -> Result<L2ToL1MessageProof, ProviderError> {
        self.call_optional(
            "zks_getL2ToL1MsgProof",
            json!([block, sender, msg]),
            "L2 to L1 message proof",
        )
        .await
    }

    async fn get_all_account_balances(
        &self,
        address: Address,
    ) -> Result<HashMap<Address, U256>, ProviderError> {
        const METHOD: &str = "zks_getAllAccountBalances";
        let raw: HashMap<Address, String> = self.call(METHOD, json!([address])).await?;

        raw.into_iter()
            .map(|(token, balance)| {
                decode_quantity(&balance)
                    .map(|amount| (token, amount))
                    .map_err(|e| ProviderError::Decode {
                        method: METHOD,
                        reason: format!("balance of {}: {}", token, e),
                    })
            })
            .collect()
    }

    async fn get_bridge_contracts(&self) -> Result<BridgeContracts, ProviderError> {
        self.call("zks_getBridgeContracts", json!([])).await
    }

    async fn estimate_fee(&self, tx: &Transaction) -> Result<Fee, ProviderError> {
        self.call("zks_estimateFee", json!([tx])).await
    }

    async fn get_testnet_paymaster(&self) -> Result<Address, ProviderError> {
        self.call("zks_getTestnetPaymaster", json!([])).await
    }

    async fn get_block_details(&self, block: u32) -> Result<BlockDetails, ProviderError> {
        self.call_optional("zks_getBlockDetails", json!([block]), "block details")
            .await
    }

    async fn get_logs(&self, filter: &FilterQuery) -> Result<Vec<Log>, ProviderError> {
        let arg = filter.to_filter_arg()?;
        let logs: Option<Vec<Log>> = self.call("eth_getLogs", json!([arg])).await?;
        Ok(logs.unwrap_or_default())
    }
}
