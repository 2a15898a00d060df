use alloy_primitives::{TxHash, U64};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use zksync_provider::types::{BlockHeader, TransactionReceipt};
use zksync_provider::waiter::{wait_finalized, wait_mined};
use zksync_provider::*;

const TICK: Duration = Duration::from_secs(1);

/// Source replaying scripted lookup results
///
/// Once the receipt script runs out every lookup is `NotFound`; once the
/// header script runs out every lookup is `NotFound` as well.
struct ScriptedSource {
    receipts: Mutex<VecDeque<Result<TransactionReceipt, ProviderError>>>,
    headers: Mutex<VecDeque<Result<BlockHeader, ProviderError>>>,
    receipt_calls: AtomicUsize,
    header_calls: AtomicUsize,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            receipts: Mutex::new(VecDeque::new()),
            headers: Mutex::new(VecDeque::new()),
            receipt_calls: AtomicUsize::new(0),
            header_calls: AtomicUsize::new(0),
        }
    }

    fn receipt(self, result: Result<TransactionReceipt, ProviderError>) -> Self {
        self.receipts.lock().unwrap().push_back(result);
        self
    }

    fn header(self, result: Result<BlockHeader, ProviderError>) -> Self {
        self.headers.lock().unwrap().push_back(result);
        self
    }

    fn receipt_calls(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    fn header_calls(&self) -> usize {
        self.header_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationSource for ScriptedSource {
    async fn fetch_receipt(&self, _tx_hash: TxHash) -> Result<TransactionReceipt, ProviderError> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        self.receipts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::NotFound("transaction receipt")))
    }

    async fn fetch_finalized_header(&self) -> Result<BlockHeader, ProviderError> {
        self.header_calls.fetch_add(1, Ordering::SeqCst);
        self.headers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::NotFound("finalized block")))
    }
}

fn tx_hash() -> TxHash {
    TxHash::left_padding_from(&[0xaa])
}

fn mined(block: u64) -> Result<TransactionReceipt, ProviderError> {
    Ok(TransactionReceipt {
        transaction_hash: tx_hash(),
        block_number: Some(U64::from(block)),
        ..TransactionReceipt::default()
    })
}

fn pending() -> Result<TransactionReceipt, ProviderError> {
    Ok(TransactionReceipt {
        transaction_hash: tx_hash(),
        ..TransactionReceipt::default()
    })
}

fn not_found() -> Result<TransactionReceipt, ProviderError> {
    Err(ProviderError::NotFound("transaction receipt"))
}

fn finalized(number: u64) -> Result<BlockHeader, ProviderError> {
    Ok(BlockHeader {
        number: U64::from(number),
        ..BlockHeader::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_wait_mined_after_retries() {
    let source = ScriptedSource::new()
        .receipt(not_found())
        .receipt(not_found())
        .receipt(mined(100));
    let start = Instant::now();

    let receipt = wait_mined(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap();

    assert_eq!(receipt.block_number, Some(U64::from(100)));
    assert_eq!(source.receipt_calls(), 3);

    let elapsed = start.elapsed();
    assert!(elapsed >= 2 * TICK, "returned too early: {:?}", elapsed);
    assert!(elapsed < 3 * TICK, "returned too late: {:?}", elapsed);

    // No polling continues after success
    tokio::time::sleep(5 * TICK).await;
    assert_eq!(source.receipt_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_wait_mined_skips_receipt_without_block() {
    let source = ScriptedSource::new()
        .receipt(pending())
        .receipt(Err(ProviderError::Rpc {
            method: "eth_getTransactionReceipt",
            source: RpcError::InvalidResponse("HTTP 502 Bad Gateway: ".to_string()),
        }))
        .receipt(mined(7));

    let receipt = wait_mined(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap();

    assert_eq!(receipt.block_number, Some(U64::from(7)));
    assert_eq!(source.receipt_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_wait_mined_explicit_cancel() {
    let source = ScriptedSource::new();
    let cancel = CancelToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            cancel.cancel();
        })
    };

    let err = wait_mined(&source, tx_hash(), &cancel, TICK).await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, WaitError::Cancelled(CancelReason::Cancelled)));
    // attempts at t = 0 and t = 1
    assert_eq!(source.receipt_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_wait_mined_deadline_two_ticks() {
    let source = ScriptedSource::new();
    let cancel = CancelToken::with_timeout(2 * TICK);
    let start = Instant::now();

    let err = wait_mined(&source, tx_hash(), &cancel, TICK).await.unwrap_err();

    assert_eq!(err.cancel_reason(), Some(CancelReason::DeadlineExceeded));
    assert!(start.elapsed() <= 3 * TICK);
    assert!(source.receipt_calls() <= 3);
}

#[tokio::test(start_paused = true)]
async fn test_wait_mined_idempotent() {
    let source = ScriptedSource::new().receipt(mined(100)).receipt(mined(100));
    let cancel = CancelToken::new();

    let first = wait_mined(&source, tx_hash(), &cancel, TICK).await.unwrap();
    assert_eq!(source.receipt_calls(), 1);

    let second = wait_mined(&source, tx_hash(), &cancel, TICK).await.unwrap();
    assert_eq!(source.receipt_calls(), 2);

    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_after_three_polls() {
    let source = ScriptedSource::new()
        .receipt(mined(100))
        .header(finalized(98))
        .header(finalized(99))
        .header(finalized(101));
    let expected = mined(100).unwrap();

    let receipt = wait_finalized(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap();

    assert_eq!(receipt, expected);
    assert_eq!(source.header_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_equal_block_is_final() {
    let source = ScriptedSource::new().receipt(mined(100)).header(finalized(100));

    let receipt = wait_finalized(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap();

    assert_eq!(receipt.block_number, Some(U64::from(100)));
    assert_eq!(source.header_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_fetch_error_is_fatal() {
    let transport_error = ProviderError::Rpc {
        method: "eth_getBlockByNumber",
        source: RpcError::InvalidResponse("HTTP 502 Bad Gateway: ".to_string()),
    };
    let source = ScriptedSource::new()
        .receipt(mined(100))
        .header(Err(transport_error))
        .header(finalized(200));

    let err = wait_finalized(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::FinalizedBlock(ProviderError::Rpc { .. })));
    assert_eq!(source.header_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_missing_header_is_fatal() {
    let source = ScriptedSource::new()
        .receipt(mined(100))
        .header(Err(ProviderError::NotFound("finalized block")));

    let err = wait_finalized(&source, tx_hash(), &CancelToken::new(), TICK)
        .await
        .unwrap_err();

    match err {
        WaitError::FinalizedBlock(inner) => assert!(inner.is_not_found()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_cancelled_while_mining() {
    let source = ScriptedSource::new();
    let cancel = CancelToken::with_timeout(Duration::from_millis(1500));

    let err = wait_finalized(&source, tx_hash(), &cancel, TICK)
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::NotMined(_)));
    assert_eq!(err.cancel_reason(), Some(CancelReason::DeadlineExceeded));
    assert_eq!(source.header_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_wait_finalized_cancelled_while_finalizing() {
    let source = ScriptedSource::new()
        .receipt(mined(100))
        .header(finalized(10))
        .header(finalized(20))
        .header(finalized(30));
    let cancel = CancelToken::with_timeout(Duration::from_millis(1500));

    let err = wait_finalized(&source, tx_hash(), &cancel, TICK)
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::Cancelled(CancelReason::DeadlineExceeded)));
    assert_eq!(source.header_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_waits_are_independent() {
    let fast = ScriptedSource::new().receipt(mined(1));
    let slow = ScriptedSource::new()
        .receipt(not_found())
        .receipt(not_found())
        .receipt(not_found())
        .receipt(mined(2));
    let cancel = CancelToken::new();

    let (a, b) = tokio::join!(
        wait_mined(&fast, tx_hash(), &cancel, TICK),
        wait_mined(&slow, tx_hash(), &cancel, TICK),
    );

    assert_eq!(a.unwrap().block_number, Some(U64::from(1)));
    assert_eq!(b.unwrap().block_number, Some(U64::from(2)));
    assert_eq!(fast.receipt_calls(), 1);
    assert_eq!(slow.receipt_calls(), 4);
}
