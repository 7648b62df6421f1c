use std::env;

use crate::error::Web3Error;

/// Client configuration
///
/// Loaded from environment variables with development-friendly defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL
    pub rpc_url: String,

    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first when one exists, then falls back to
    /// defaults for anything undefined.
    ///
    /// # Environment Variables
    ///
    /// * `ETHEREUM_RPC_URL` - JSON-RPC endpoint (default: "http://localhost:8545")
    /// * `RPC_TIMEOUT_SECS` - per-request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, Web3Error> {
        // Load .env if it exists (useful for development)
        let _ = dotenv::dotenv();

        Ok(Config {
            rpc_url: env::var("ETHEREUM_RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8545".to_string()),
            request_timeout_secs: env::var("RPC_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .map_err(|e| Web3Error::Config(format!("RPC_TIMEOUT_SECS: {e}")))?,
        })
    }
}
