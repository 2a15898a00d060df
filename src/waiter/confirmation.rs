//! Polling loops that wait for a transaction to be mined or finalized.
//!
//! Both loops poll at a fixed interval on a timer owned by the call and
//! observe cancellation between attempts. They differ in how a failed fetch
//! is treated:
//! - receipt lookups that fail or return an unmined receipt are retried
//!   until cancellation, since mining is a future event;
//! - a failed (or `null`) finalized-block lookup ends the wait immediately,
//!   since a live chain always has a finalized block.

use super::cancel::CancelToken;
use crate::types::{BlockHeader, TransactionReceipt};
use crate::utils::error::{ProviderError, WaitError};
use alloy_primitives::TxHash;
use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Lookups the waiter polls
///
/// **Public** - implemented by `DefaultProvider`; tests plug in scripted sources
#[async_trait]
pub trait ConfirmationSource: Send + Sync {
    /// Fetch the receipt for `tx_hash`; `NotFound` while unknown to the node
    async fn fetch_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ProviderError>;

    /// Fetch the header of the latest finalized block
    async fn fetch_finalized_header(&self) -> Result<BlockHeader, ProviderError>;
}

/// Wait until `tx_hash` has a receipt with a block number
///
/// **Public** - polls receipts until the node reports the transaction in a block
///
/// The first lookup happens immediately, then once per `poll_interval`.
/// Lookup failures count as "not mined yet". Polling only stops on success
/// or when `cancel` fires.
///
/// # Errors
/// * `WaitError::Cancelled` if `cancel` fires before a mined receipt is seen
pub async fn wait_mined<S>(
    source: &S,
    tx_hash: TxHash,
    cancel: &CancelToken,
    poll_interval: Duration,
) -> Result<TransactionReceipt, WaitError>
where
    S: ConfirmationSource + ?Sized,
{
    if let Some(reason) = cancel.reason() {
        return Err(WaitError::Cancelled(reason));
    }

    let mut ticker = start_ticker(poll_interval).await;
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        match source.fetch_receipt(tx_hash).await {
            Ok(receipt) if receipt.is_mined() => {
                info!(
                    "Transaction {} mined in block {} (attempt {})",
                    tx_hash,
                    receipt.block_number.unwrap_or_default(),
                    attempt
                );
                return Ok(receipt);
            }
            Ok(_) => debug!("Transaction {} pending (attempt {})", tx_hash, attempt),
            Err(e) => debug!("Receipt for {} not available (attempt {}): {}", tx_hash, attempt, e),
        }

        // Wait for the next round
        tokio::select! {
            biased;
            reason = cancel.cancelled() => {
                debug!("Stopped waiting for {} after {} attempts: {}", tx_hash, attempt, reason);
                return Err(WaitError::Cancelled(reason));
            }
            _ = ticker.tick() => {}
        }
    }
}

/// Wait until `tx_hash` is mined and its block is finalized
///
/// **Public** - blocks until the transaction's block is finalized on L1
///
/// Runs `wait_mined`, then polls the latest finalized block until its
/// number reaches the receipt's block number. Returns the receipt from
/// `wait_mined` unchanged.
///
/// # Errors
/// * `WaitError::NotMined` wrapping the `wait_mined` failure
/// * `WaitError::MissingBlockNumber` if the mined receipt has no block number
/// * `WaitError::FinalizedBlock` on the first failed finalized-block lookup
/// * `WaitError::Cancelled` if `cancel` fires while polling finalization
pub async fn wait_finalized<S>(
    source: &S,
    tx_hash: TxHash,
    cancel: &CancelToken,
    poll_interval: Duration,
) -> Result<TransactionReceipt, WaitError>
where
    S: ConfirmationSource + ?Sized,
{
    let receipt = wait_mined(source, tx_hash, cancel, poll_interval)
        .await
        .map_err(|e| WaitError::NotMined(Box::new(e)))?;

    let block_number = receipt.block_number.ok_or(WaitError::MissingBlockNumber)?;

    let mut ticker = start_ticker(poll_interval).await;
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let header = tokio::select! {
            biased;
            reason = cancel.cancelled() => return Err(WaitError::Cancelled(reason)),
            fetched = source.fetch_finalized_header() => fetched.map_err(WaitError::FinalizedBlock)?,
        };

        if header.number >= block_number {
            info!(
                "Transaction {} finalized (block {} <= finalized {})",
                tx_hash, block_number, header.number
            );
            return Ok(receipt);
        }
        debug!(
            "Transaction {} in block {} not finalized yet, finalized head {} (attempt {})",
            tx_hash, block_number, header.number, attempt
        );

        // Wait for the next round
        tokio::select! {
            biased;
            reason = cancel.cancelled() => return Err(WaitError::Cancelled(reason)),
            _ = ticker.tick() => {}
        }
    }
}

/// Create the per-call ticker and consume its immediate first tick
///
/// **Private** - the first lookup of each loop runs without waiting
async fn start_ticker(poll_interval: Duration) -> Interval {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    ticker
}
