//! JSON-RPC transport for communicating with zkSync nodes.

pub mod client;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::RpcClient;
pub use transport::Transport;
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
