use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request envelope
///
/// One envelope is built per call and discarded once the response arrives.
/// The id is assigned by the transport from its per-client counter.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    /// Request identifier, unique per client and monotonically increasing
    pub id: u64,

    /// Method name to call
    pub method: &'a str,

    /// Positional method parameters
    pub params: Vec<Value>,

    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: &'static str,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Vec<Value>) -> Self {
        Self {
            id,
            method,
            params,
            jsonrpc: "2.0",
        }
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result`/`error` is expected; when `error` is present the
/// result is ignored. The id is optional on the wire because servers answer
/// unparseable requests with a null id.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    /// Request identifier echoed by the server
    #[serde(default)]
    pub id: Option<u64>,

    /// Method result, absent on failure
    #[serde(default)]
    pub result: Option<Value>,

    /// Error details, absent on success
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(default)]
    pub data: Option<String>,
}
