// Wire-level data models
pub mod jsonrpc;
pub mod types;
