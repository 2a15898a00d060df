//! Typed zkSync provider over a JSON-RPC transport.

pub mod default;

pub use default::DefaultProvider;

use crate::types::{
    Block, BlockDetails, BlockNumber, BridgeContracts, Fee, FilterQuery, L2ToL1MessageProof, Log,
    Token, Transaction, TransactionReceipt, TransactionResponse,
};
use crate::utils::error::{ProviderError, WaitError};
use crate::waiter::CancelToken;
use alloy_primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Operations exposed by a zkSync node
///
/// **Public** - one method per RPC call, plus the two confirmation waits
///
/// Lookups for which the node answers `null` fail with
/// `ProviderError::NotFound`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Balance of `address` at `block` (`eth_getBalance`)
    async fn get_balance(&self, address: Address, block: BlockNumber) -> Result<U256, ProviderError>;

    /// Block by number or tag (`eth_getBlockByNumber`)
    async fn get_block_by_number(&self, block: BlockNumber) -> Result<Block, ProviderError>;

    /// Block by hash (`eth_getBlockByHash`)
    async fn get_block_by_hash(&self, hash: B256) -> Result<Block, ProviderError>;

    /// Nonce of `address` at `block` (`eth_getTransactionCount`)
    async fn get_transaction_count(
        &self,
        address: Address,
        block: BlockNumber,
    ) -> Result<U256, ProviderError>;

    /// Receipt of `tx_hash` (`eth_getTransactionReceipt`)
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ProviderError>;

    /// Transaction by hash (`eth_getTransactionByHash`)
    async fn get_transaction(&self, tx_hash: TxHash) -> Result<TransactionResponse, ProviderError>;

    /// Wait until `tx_hash` is mined
    async fn wait_mined(&self, tx_hash: TxHash, cancel: &CancelToken) -> Result<TransactionReceipt, WaitError>;

    /// Wait until `tx_hash` is mined and its block finalized
    async fn wait_finalized(
        &self,
        tx_hash: TxHash,
        cancel: &CancelToken,
    ) -> Result<TransactionReceipt, WaitError>;

    /// Gas estimate against the latest block (`eth_estimateGas`)
    async fn estimate_gas(&self, tx: &Transaction) -> Result<U256, ProviderError>;

    /// Current gas price (`eth_gasPrice`)
    async fn get_gas_price(&self) -> Result<U256, ProviderError>;

    /// Submit a signed transaction (`eth_sendRawTransaction`)
    async fn send_raw_transaction(&self, tx: &[u8]) -> Result<TxHash, ProviderError>;

    /// Main zkSync contract on L1 (`zks_getMainContract`)
    async fn get_main_contract(&self) -> Result<Address, ProviderError>;

    /// Chain id of the underlying L1 (`zks_L1ChainId`)
    async fn l1_chain_id(&self) -> Result<U256, ProviderError>;

    /// Latest L1 batch number (`zks_L1BatchNumber`)
    async fn l1_batch_number(&self) -> Result<U256, ProviderError>;

    /// Page of confirmed tokens (`zks_getConfirmedTokens`)
    async fn get_confirmed_tokens(&self, from: u32, limit: u8) -> Result<Vec<Token>, ProviderError>;

    /// Whether `token` can be used to pay fees (`zks_isTokenLiquid`)
    async fn is_token_liquid(&self, token: Address) -> Result<bool, ProviderError>;

    /// USD price of `token` (`zks_getTokenPrice`)
    async fn get_token_price(&self, token: Address) -> Result<Decimal, ProviderError>;

    /// Proof for an L2 to L1 log of `tx_hash` (`zks_getL2ToL1LogProof`)
    async fn get_l2_to_l1_log_proof(
        &self,
        tx_hash: TxHash,
        log_index: u64,
    ) -> Result<L2ToL1MessageProof, ProviderError>;

    /// Proof for a message sent by `sender` in `block` (`zks_getL2ToL1MsgProof`)
    async fn get_l2_to_l1_msg_proof(
        &self,
        block: u32,
        sender: Address,
        msg: B256,
    ) -> Result<L2ToL1MessageProof, ProviderError>;

    /// Every token balance of `address` (`zks_getAllAccountBalances`)
    async fn get_all_account_balances(
        &self,
        address: Address,
    ) -> Result<HashMap<Address, U256>, ProviderError>;

    /// Default bridge addresses (`zks_getBridgeContracts`)
    async fn get_bridge_contracts(&self) -> Result<BridgeContracts, ProviderError>;

    /// Fee estimate for `tx` (`zks_estimateFee`)
    async fn estimate_fee(&self, tx: &Transaction) -> Result<Fee, ProviderError>;

    /// Testnet paymaster address (`zks_getTestnetPaymaster`)
    async fn get_testnet_paymaster(&self) -> Result<Address, ProviderError>;

    /// Commit/prove/execute details of an L2 block (`zks_getBlockDetails`)
    async fn get_block_details(&self, block: u32) -> Result<BlockDetails, ProviderError>;

    /// Logs matching `filter` (`eth_getLogs`)
    async fn get_logs(&self, filter: &FilterQuery) -> Result<Vec<Log>, ProviderError>;
}
