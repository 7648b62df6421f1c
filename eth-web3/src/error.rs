use thiserror::Error;

/// Library-wide error type
///
/// This enum covers every failure the library can surface: local validation,
/// transport problems, protocol violations, server-side JSON-RPC errors and
/// signing failures. Validation variants are always produced before any I/O;
/// nothing in the library retries on the caller's behalf.
#[derive(Error, Debug)]
pub enum Web3Error {
    /// A decimal amount string could not be parsed or represented
    #[error("invalid number format: {0}")]
    InvalidNumberFormat(String),

    /// The unit name is not in the registry
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// A hex string was missing its 0x prefix or contained invalid digits
    #[error("malformed hex string: {0}")]
    MalformedHex(String),

    /// An address string failed the length/charset check
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A required transaction field was not set before signing
    #[error("missing transaction field: {0}")]
    MissingField(&'static str),

    /// Configuration could not be loaded from the environment
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Network-level failure: connection, timeout, cancellation, bad status
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid JSON-RPC envelope, or a result did
    /// not match the expected shape
    #[error("failed to decode RPC response: {0}")]
    Decode(String),

    /// The node returned a JSON-RPC error object; code/message/data are
    /// surfaced intact so callers can branch on standard error codes
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    /// The response id did not match the request id
    #[error("response id {received} does not match request id {sent}")]
    IdMismatch { sent: u64, received: u64 },

    /// Signing or raw-transaction decoding failed in the cryptographic layer
    #[error("signing error: {0}")]
    Signing(String),
}
