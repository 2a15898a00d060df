use alloy_primitives::{Address, U256, U64};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zksync_provider::types::BlockNumber;
use zksync_provider::*;

const POLL: Duration = Duration::from_millis(20);

fn tx_hash_hex() -> String {
    format!("0x{}", "aa".repeat(32))
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
}

fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": code, "message": message}
    }))
}

/// Mount a mock answering every call to `rpc_method`
async fn mount(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_string_contains(format!("\"method\":\"{}\"", rpc_method)))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn provider(server: &MockServer) -> DefaultProvider {
    DefaultProvider::new(server.uri())
        .expect("Failed to create provider")
        .with_poll_interval(POLL)
}

#[tokio::test]
async fn test_get_balance_over_http() {
    let server = MockServer::start().await;
    mount(&server, "eth_getBalance", rpc_result(json!("0x1bc16d674ec80000"))).await;

    let balance = provider(&server)
        .await
        .get_balance(Address::repeat_byte(0x11), BlockNumber::Latest)
        .await
        .expect("Failed to get balance");

    assert_eq!(balance, U256::from(2_000_000_000_000_000_000u64));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider(&server).await.get_gas_price().await.unwrap_err();

    match err {
        ProviderError::Rpc {
            method,
            source: RpcError::InvalidResponse(message),
        } => {
            assert_eq!(method, "eth_gasPrice");
            assert!(message.contains("503"), "unexpected message: {}", message);
            assert!(message.contains("overloaded"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_method_not_supported() {
    let server = MockServer::start().await;
    mount(&server, "zks_getTestnetPaymaster", rpc_error(-32601, "Method not found")).await;

    let err = provider(&server).await.get_testnet_paymaster().await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Rpc {
            source: RpcError::MethodNotSupported(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_null_receipt_is_not_found() {
    let server = MockServer::start().await;
    mount(&server, "eth_getTransactionReceipt", rpc_result(Value::Null)).await;

    let tx_hash = tx_hash_hex().parse().unwrap();
    let err = provider(&server)
        .await
        .get_transaction_receipt(tx_hash)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_zks_queries() {
    let server = MockServer::start().await;
    let main_contract = "0x32400084c286cf3e17e7b677ea9583e60a000324";
    mount(&server, "zks_getMainContract", rpc_result(json!(main_contract))).await;
    mount(&server, "zks_L1ChainId", rpc_result(json!("0x1"))).await;
    mount(&server, "zks_L1BatchNumber", rpc_result(json!("0x1e240"))).await;
    mount(&server, "zks_isTokenLiquid", rpc_result(json!(true))).await;
    mount(
        &server,
        "zks_getBridgeContracts",
        rpc_result(json!({
            "l1Erc20DefaultBridge": "0x57891966931eb4bb6fb81430e6ce0a03aabde063",
            "l2Erc20DefaultBridge": "0x11f943b2c77b743ab90f4a0ae7d5a4e7fca3e102"
        })),
    )
    .await;

    let provider = provider(&server).await;

    assert_eq!(provider.get_main_contract().await.unwrap(), main_contract.parse::<Address>().unwrap());
    assert_eq!(provider.l1_chain_id().await.unwrap(), U256::from(1));
    assert_eq!(provider.l1_batch_number().await.unwrap(), U256::from(123_456));
    assert!(provider.is_token_liquid(Address::ZERO).await.unwrap());

    let bridges = provider.get_bridge_contracts().await.unwrap();
    assert_eq!(bridges.l1_weth_bridge, None);
}

#[tokio::test]
async fn test_block_details_over_http() {
    let server = MockServer::start().await;
    mount(
        &server,
        "zks_getBlockDetails",
        rpc_result(json!({
            "number": 140599,
            "timestamp": 1679815038,
            "l1TxCount": 1,
            "l2TxCount": 0,
            "rootHash": format!("0x{}", "0f".repeat(32)),
            "status": "verified",
            "commitTxHash": format!("0x{}", "5b".repeat(32)),
            "committedAt": "2023-03-26T07:21:21.046817Z",
            "proveTxHash": null,
            "provenAt": null,
            "executeTxHash": null,
            "executedAt": null
        })),
    )
    .await;

    let details = provider(&server).await.get_block_details(140599).await.unwrap();

    assert_eq!(details.number, 140599);
    assert_eq!(details.status, "verified");
    assert!(details.committed_at.is_some());
    assert!(details.executed_at.is_none());
}

#[tokio::test]
async fn test_wait_mined_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("eth_getTransactionReceipt"))
        .respond_with(rpc_result(Value::Null))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount(
        &server,
        "eth_getTransactionReceipt",
        rpc_result(json!({
            "transactionHash": tx_hash_hex(),
            "blockNumber": "0x64",
            "status": "0x1"
        })),
    )
    .await;

    let tx_hash = tx_hash_hex().parse().unwrap();
    let cancel = CancelToken::with_timeout(Duration::from_secs(5));
    let receipt = provider(&server)
        .await
        .wait_mined(tx_hash, &cancel)
        .await
        .expect("Failed to wait for receipt");

    assert_eq!(receipt.block_number, Some(U64::from(100)));
    assert!(receipt.is_success());

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_wait_finalized_over_http() {
    let server = MockServer::start().await;
    mount(
        &server,
        "eth_getTransactionReceipt",
        rpc_result(json!({"transactionHash": tx_hash_hex(), "blockNumber": "0x64"})),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"finalized\""))
        .respond_with(rpc_result(json!({"number": "0x63"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount(&server, "eth_getBlockByNumber", rpc_result(json!({"number": "0x64"}))).await;

    let tx_hash = tx_hash_hex().parse().unwrap();
    let cancel = CancelToken::with_timeout(Duration::from_secs(5));
    let receipt = provider(&server)
        .await
        .wait_finalized(tx_hash, &cancel)
        .await
        .expect("Failed to wait for finalization");

    assert_eq!(receipt.block_number, Some(U64::from(100)));
}

#[tokio::test]
async fn test_wait_finalized_rpc_error_is_fatal() {
    let server = MockServer::start().await;
    mount(
        &server,
        "eth_getTransactionReceipt",
        rpc_result(json!({"transactionHash": tx_hash_hex(), "blockNumber": "0x64"})),
    )
    .await;
    mount(&server, "eth_getBlockByNumber", rpc_error(-32000, "finalized block unavailable")).await;

    let tx_hash = tx_hash_hex().parse().unwrap();
    let cancel = CancelToken::with_timeout(Duration::from_secs(5));
    let err = provider(&server)
        .await
        .wait_finalized(tx_hash, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::FinalizedBlock(ProviderError::Rpc { .. })));
    assert!(!err.is_cancelled());
}
