//! HTTP client for communicating with a zkSync node RPC endpoint.

use super::transport::Transport;
use super::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::utils::config::DEFAULT_RPC_TIMEOUT;
use crate::utils::error::RpcError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC client over HTTP
pub struct RpcClient {
    client: Client,
    rpc_url: Url,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client
    ///
    /// # Arguments
    /// * `rpc_url` - URL of the RPC endpoint (e.g., "http://localhost:3050")
    ///
    /// # Errors
    /// Returns `RpcError` if the URL is invalid or client creation fails
    pub fn new(rpc_url: impl AsRef<str>) -> Result<Self, RpcError> {
        Self::with_timeout(rpc_url, DEFAULT_RPC_TIMEOUT)
    }

    /// Create a client with custom timeout
    pub fn with_timeout(rpc_url: impl AsRef<str>, timeout: Duration) -> Result<Self, RpcError> {
        let raw = rpc_url.as_ref();
        let rpc_url = Url::parse(raw).map_err(|e| RpcError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            rpc_url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client talks to
    pub fn url(&self) -> &Url {
        &self.rpc_url
    }
}

#[async_trait]
impl Transport for RpcClient {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);

        debug!("RPC request #{}: {} {}", id, method, request.params);

        let response = self
            .client
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::InvalidResponse(format!("HTTP {}: {}", status, body)));
        }

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("malformed JSON-RPC body: {}", e)))?;

        if let Some(error) = rpc_response.error {
            debug!("RPC request #{} failed: {} {}", id, error.code, error.message);
            return Err(map_rpc_error(error, method));
        }

        Ok(rpc_response.result)
    }
}

/// Map JSON-RPC error to our error type
///
/// **Private** - internal error mapping logic
fn map_rpc_error(error: JsonRpcError, method: &str) -> RpcError {
    match error.code {
        -32601 => RpcError::MethodNotSupported(method.to_string()),
        code => RpcError::Rpc {
            code,
            message: error.message,
        },
    }
}
