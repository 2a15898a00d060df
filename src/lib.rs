//! zkSync provider library
//!
//! Typed access to a zkSync node's JSON-RPC interface plus polling helpers
//! that wait for a transaction to be mined or finalized.

pub mod provider;
pub mod rpc;
pub mod types;
pub mod utils;
pub mod waiter;

pub use provider::{DefaultProvider, Provider};
pub use rpc::{RpcClient, Transport};
pub use utils::config::ProviderConfig;
pub use utils::error::{HexError, ProviderError, RpcError, WaitError};
pub use waiter::{CancelReason, CancelToken, ConfirmationSource};
