//! Command implementations for the zks CLI.
//!
//! Every command prints its result to stdout as pretty JSON.

use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use zksync_provider::types::{BlockNumber, FilterQuery, Transaction};
use zksync_provider::{CancelToken, Provider};

/// Which block the `block` command fetches
#[derive(Debug, Clone, Copy)]
pub enum BlockSelector {
    Number(BlockNumber),
    Hash(B256),
}

/// Arguments for the `wait` command
#[derive(Debug, Clone)]
pub struct WaitArgs {
    pub tx_hash: TxHash,
    pub finalized: bool,
    pub timeout: Option<Duration>,
}

/// Arguments for the `estimate` command
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: Option<U256>,
    pub full_fee: bool,
}

/// Arguments for the `logs` command
#[derive(Debug, Clone)]
pub struct LogsArgs {
    pub from_block: Option<BlockNumber>,
    pub to_block: Option<BlockNumber>,
    pub block_hash: Option<B256>,
    pub addresses: Vec<Address>,
    pub topics: Vec<B256>,
}

impl LogsArgs {
    /// Build the provider filter, one topic value per position
    fn to_filter(&self) -> FilterQuery {
        FilterQuery {
            block_hash: self.block_hash,
            from_block: self.from_block,
            to_block: self.to_block,
            addresses: self.addresses.clone(),
            topics: self.topics.iter().map(|topic| vec![*topic]).collect(),
        }
    }
}

/// Print a value as pretty JSON
///
/// **Private** - shared output path for all commands
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

pub async fn balance(provider: &impl Provider, address: Address, block: BlockNumber) -> Result<()> {
    let balance = provider.get_balance(address, block).await?;
    print_json(&json!({ "address": address, "block": block, "wei": balance.to_string() }))
}

pub async fn nonce(provider: &impl Provider, address: Address, block: BlockNumber) -> Result<()> {
    let nonce = provider.get_transaction_count(address, block).await?;
    print_json(&json!({ "address": address, "block": block, "nonce": nonce.to_string() }))
}

pub async fn block(provider: &impl Provider, selector: BlockSelector) -> Result<()> {
    let block = match selector {
        BlockSelector::Number(number) => provider.get_block_by_number(number).await?,
        BlockSelector::Hash(hash) => provider.get_block_by_hash(hash).await?,
    };
    print_json(&block)
}

pub async fn receipt(provider: &impl Provider, tx_hash: TxHash) -> Result<()> {
    let receipt = provider.get_transaction_receipt(tx_hash).await?;
    print_json(&receipt)
}

pub async fn transaction(provider: &impl Provider, tx_hash: TxHash) -> Result<()> {
    let tx = provider.get_transaction(tx_hash).await?;
    print_json(&tx)
}

/// Wait for a transaction, cancelling on Ctrl-C or timeout
pub async fn wait(provider: &impl Provider, args: WaitArgs) -> Result<()> {
    let cancel = match args.timeout {
        Some(timeout) => CancelToken::with_timeout(timeout),
        None => CancelToken::new(),
    };

    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling wait");
                cancel.cancel();
            }
        })
    };

    info!(
        "Waiting for {} to be {}",
        args.tx_hash,
        if args.finalized { "finalized" } else { "mined" }
    );

    let result = if args.finalized {
        provider.wait_finalized(args.tx_hash, &cancel).await
    } else {
        provider.wait_mined(args.tx_hash, &cancel).await
    };
    interrupt.abort();

    let receipt = result.with_context(|| format!("Failed to wait for {}", args.tx_hash))?;
    print_json(&receipt)
}

pub async fn gas_price(provider: &impl Provider) -> Result<()> {
    let price = provider.get_gas_price().await?;
    print_json(&json!({ "wei": price.to_string() }))
}

pub async fn estimate(provider: &impl Provider, args: EstimateArgs) -> Result<()> {
    let mut tx = Transaction::call(args.from, args.to, args.data);
    if let Some(value) = args.value {
        tx = tx.with_value(value);
    }

    if args.full_fee {
        let fee = provider.estimate_fee(&tx).await?;
        print_json(&json!({
            "gas_limit": fee.gas_limit.to_string(),
            "max_fee_per_gas": fee.max_fee_per_gas.to_string(),
            "max_priority_fee_per_gas": fee.max_priority_fee_per_gas.to_string(),
            "gas_per_pubdata_limit": fee.gas_per_pubdata_limit.to_string(),
            "max_total_wei": fee.max_total().to_string(),
        }))
    } else {
        let gas = provider.estimate_gas(&tx).await?;
        print_json(&json!({ "gas": gas.to_string() }))
    }
}

pub async fn send_raw(provider: &impl Provider, data: &Bytes) -> Result<()> {
    let tx_hash = provider.send_raw_transaction(data).await?;
    print_json(&json!({ "transaction_hash": tx_hash }))
}

/// Chain-level information; the testnet paymaster is optional
pub async fn chain_info(provider: &impl Provider) -> Result<()> {
    let main_contract = provider.get_main_contract().await?;
    let l1_chain_id = provider.l1_chain_id().await?;
    let l1_batch_number = provider.l1_batch_number().await?;
    let bridges = provider.get_bridge_contracts().await?;

    let paymaster = match provider.get_testnet_paymaster().await {
        Ok(address) => Some(address),
        Err(e) => {
            warn!("No testnet paymaster: {}", e);
            None
        }
    };

    print_json(&json!({
        "main_contract": main_contract,
        "l1_chain_id": l1_chain_id.to_string(),
        "l1_batch_number": l1_batch_number.to_string(),
        "bridge_contracts": bridges,
        "testnet_paymaster": paymaster,
    }))
}

pub async fn tokens(provider: &impl Provider, from: u32, limit: u8) -> Result<()> {
    let tokens = provider.get_confirmed_tokens(from, limit).await?;
    print_json(&tokens)
}

pub async fn token(provider: &impl Provider, address: Address) -> Result<()> {
    let liquid = provider.is_token_liquid(address).await?;
    let price = provider.get_token_price(address).await?;
    print_json(&json!({ "token": address, "liquid": liquid, "price_usd": price.to_string() }))
}

pub async fn balances(provider: &impl Provider, address: Address) -> Result<()> {
    let balances = provider.get_all_account_balances(address).await?;
    let rendered: serde_json::Map<String, serde_json::Value> = balances
        .into_iter()
        .map(|(token, amount)| (token.to_string(), json!(amount.to_string())))
        .collect();
    print_json(&rendered)
}

pub async fn block_details(provider: &impl Provider, number: u32) -> Result<()> {
    let details = provider.get_block_details(number).await?;
    print_json(&json!({ "block_time": details.datetime(), "details": details }))
}

pub async fn log_proof(provider: &impl Provider, tx_hash: TxHash, index: u64) -> Result<()> {
    let proof = provider.get_l2_to_l1_log_proof(tx_hash, index).await?;
    print_json(&proof)
}

pub async fn msg_proof(provider: &impl Provider, block: u32, sender: Address, msg: B256) -> Result<()> {
    let proof = provider.get_l2_to_l1_msg_proof(block, sender, msg).await?;
    print_json(&proof)
}

pub async fn logs(provider: &impl Provider, args: LogsArgs) -> Result<()> {
    let logs = provider.get_logs(&args.to_filter()).await?;
    info!("Found {} logs", logs.len());
    print_json(&logs)
}
