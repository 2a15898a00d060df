//! Default values and provider configuration.

use std::time::Duration;

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Default RPC endpoint (local zkSync node)
pub const DEFAULT_RPC_URL: &str = "http://localhost:3050";

/// Default timeout for a single RPC request
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between confirmation polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Provider configuration
///
/// **Public** - passed to `DefaultProvider::from_config`
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub rpc_url: String,
    
    /// Timeout applied to each HTTP request
    pub timeout: Duration,
    
    /// Interval between polls in `wait_mined` / `wait_finalized`
    pub poll_interval: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout: DEFAULT_RPC_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ProviderConfig {
    /// Create a config for the given endpoint with default timings
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Self::default()
        }
    }
    
    /// Set request timeout
    ///
    /// **Public** - builder pattern
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    
    /// Set confirmation poll interval
    ///
    /// **Public** - builder pattern
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
