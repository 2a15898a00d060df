//! Error types for the transport, provider and confirmation waiter.

use crate::waiter::CancelReason;
use thiserror::Error;

/// Errors raised by the JSON-RPC transport
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP request could not be sent or its body could not be read
    #[error("RPC request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Endpoint URL could not be parsed
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Response was not a well-formed JSON-RPC reply
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    /// Node returned a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Node does not implement the requested method
    #[error("Method not supported by node: {0}")]
    MethodNotSupported(String),
}

/// Errors from decoding hex quantities and hashes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("empty hex string")]
    Empty,

    #[error("hex string without 0x prefix")]
    MissingPrefix,

    #[error("hex string \"0x\"")]
    EmptyNumber,

    #[error("hex number with leading zero digits")]
    LeadingZero,

    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),

    #[error("hex number > 256 bits")]
    Overflow,

    #[error("invalid transaction hash '{value}': {reason}")]
    InvalidHash { value: String, reason: String },
}

/// Errors returned by `Provider` operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, tagged with the RPC method that was queried
    #[error("failed to query {method}: {source}")]
    Rpc {
        method: &'static str,
        #[source]
        source: RpcError,
    },

    /// Node answered `null` for a lookup
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Response could not be decoded into the expected type
    #[error("failed to decode {method} response: {reason}")]
    Decode { method: &'static str, reason: String },

    /// Log filter has conflicting fields
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

impl ProviderError {
    /// True when the node answered `null` for the lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// Errors returned by the confirmation waiter
#[derive(Debug, Error)]
pub enum WaitError {
    /// Caller's cancellation signal fired before the condition was met
    #[error("wait cancelled: {0}")]
    Cancelled(CancelReason),

    /// Waiting for the transaction to be mined failed
    #[error("failed waiting for transaction to be mined: {0}")]
    NotMined(#[source] Box<WaitError>),

    /// A mined receipt came back without a block number
    #[error("mined receipt has no block number")]
    MissingBlockNumber,

    /// Fetching the latest finalized block failed (never retried)
    #[error("failed to get finalized block: {0}")]
    FinalizedBlock(#[source] ProviderError),
}

impl WaitError {
    /// Cancellation reason, looking through context wrappers
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            WaitError::Cancelled(reason) => Some(*reason),
            WaitError::NotMined(inner) => inner.cancel_reason(),
            _ => None,
        }
    }

    /// True when the wait ended because of cancellation
    pub fn is_cancelled(&self) -> bool {
        self.cancel_reason().is_some()
    }
}
