//! Transport abstraction the provider is layered on.

use crate::utils::error::RpcError;
use async_trait::async_trait;
use serde_json::Value;

/// A JSON-RPC transport
///
/// **Public** - implemented by `RpcClient`; tests plug in stubs
///
/// `params` is the positional argument array. A `null` or absent result is
/// returned as `Value::Null`; interpreting it is up to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return its raw `result`
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}
