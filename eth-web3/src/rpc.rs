use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::Web3Error;
use crate::eth::Eth;
use crate::models::jsonrpc::{RpcRequest, RpcResponse};

/// JSON-RPC client for a single Ethereum endpoint
///
/// The client owns the request-id counter for its endpoint; clones share the
/// counter (and the underlying connection pool), so concurrent calls through
/// any clone receive distinct, monotonically increasing ids. Independent
/// clients do not share id space.
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    http: reqwest::Client,
    next_id: Arc<AtomicU64>,
}

impl Client {
    /// Create a client for the given JSON-RPC endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a client with a per-request timeout.
    ///
    /// A timed-out request surfaces as a transport error; dropping the call
    /// future cancels the request earlier than that.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, Web3Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            http,
            next_id: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Create a client from environment-backed configuration.
    pub fn from_config(config: &Config) -> Result<Self, Web3Error> {
        Self::with_timeout(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Endpoint URL this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Typed Ethereum method surface backed by this client.
    pub fn eth(&self) -> Eth<'_> {
        Eth::new(self)
    }

    /// Perform a raw JSON-RPC call and return the untyped `result` value.
    ///
    /// Numbers the request from the atomic counter, POSTs the 2.0 envelope,
    /// and surfaces failures in order of specificity: transport, envelope
    /// decode, server error object, response-id mismatch. There are no
    /// retries; a failed call is the caller's decision to repeat.
    #[instrument(skip(self, params), err)]
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, Web3Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let request = RpcRequest::new(id, method, params);

        debug!(id, method, "sending JSON-RPC request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let response: RpcResponse =
            serde_json::from_slice(&body).map_err(|e| Web3Error::Decode(e.to_string()))?;

        if let Some(error) = response.error {
            debug!(id, code = error.code, "JSON-RPC error response");
            return Err(Web3Error::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        if response.id != Some(id) {
            return Err(Web3Error::IdMismatch {
                sent: id,
                received: response.id.unwrap_or_default(),
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
