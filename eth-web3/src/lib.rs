// Library surface
pub mod abi;
pub mod config;
pub mod erc20;
pub mod error;
pub mod eth;
pub mod hex;
pub mod models;
pub mod rpc;
pub mod transaction;
pub mod units;
pub mod wallet;

pub use config::Config;
pub use error::Web3Error;
pub use rpc::Client;
pub use units::Unit;
pub use wallet::Wallet;
