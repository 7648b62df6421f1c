use std::fmt;

use alloy::primitives::{Address, Bytes, B256, B64, U256, U64};
use alloy_primitives::address;
use serde::{Deserialize, Serialize, Serializer};

/// Block selector accepted wherever the RPC spec takes a block parameter.
///
/// Serializes as the literal tag or a minimal hex block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockParameter {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl BlockParameter {
    /// Wire form of the selector.
    pub fn as_param(&self) -> String {
        match self {
            BlockParameter::Latest => "latest".to_string(),
            BlockParameter::Earliest => "earliest".to_string(),
            BlockParameter::Pending => "pending".to_string(),
            BlockParameter::Number(number) => format!("0x{number:x}"),
        }
    }
}

impl fmt::Display for BlockParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

impl Serialize for BlockParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_param())
    }
}

/// Execution status carried in a transaction receipt.
///
/// Only the two standard literals are recognized; any other value fails
/// the decode of the enclosing receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    #[serde(rename = "0x1")]
    Success,
    #[serde(rename = "0x0")]
    Failure,
}

impl TxStatus {
    pub fn is_success(self) -> bool {
        self == TxStatus::Success
    }

    pub fn is_failure(self) -> bool {
        self == TxStatus::Failure
    }
}

/// A block as returned by `eth_getBlockByNumber`/`eth_getBlockByHash`.
///
/// Quantities decode through `U64`/`U256` hex strings; fields a node may
/// omit or null (pending blocks, post-merge fields) are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub number: Option<U64>,
    #[serde(default)]
    pub hash: Option<B256>,
    pub parent_hash: B256,
    #[serde(default)]
    pub nonce: Option<B64>,
    pub sha3_uncles: B256,
    #[serde(default)]
    pub logs_bloom: Option<Bytes>,
    pub transactions_root: B256,
    pub state_root: B256,
    pub receipts_root: B256,
    #[serde(default)]
    pub miner: Option<Address>,
    pub difficulty: U256,
    #[serde(default)]
    pub total_difficulty: Option<U256>,
    pub extra_data: Bytes,
    pub size: U256,
    pub gas_limit: U256,
    pub gas_used: U256,
    pub timestamp: U256,
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub transactions: BlockTransactions,
    #[serde(default)]
    pub uncles: Vec<B256>,
}

/// Transaction list of a block: hashes, or full bodies when the block was
/// requested with `fullTransactions = true`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<B256>),
    Full(Vec<Transaction>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        BlockTransactions::Hashes(Vec::new())
    }
}

impl BlockTransactions {
    pub fn len(&self) -> usize {
        match self {
            BlockTransactions::Hashes(hashes) => hashes.len(),
            BlockTransactions::Full(transactions) => transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A transaction as returned by `eth_getTransactionByHash` and by blocks
/// fetched with full transaction bodies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: B256,
    pub nonce: U64,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    pub value: U256,
    pub gas: U256,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<U256>,
    pub input: Bytes,
}

/// A receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub transaction_index: U64,
    pub block_hash: B256,
    pub block_number: U64,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    pub cumulative_gas_used: U256,
    pub gas_used: U256,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub status: Option<TxStatus>,
    #[serde(default)]
    pub effective_gas_price: Option<U256>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// A log entry as returned by `eth_getLogs` and inside receipts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    #[serde(default)]
    pub log_index: Option<U64>,
    #[serde(default)]
    pub removed: bool,
}

/// Filter object for `eth_getLogs`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<B256>>,
}

/// Call object for `eth_call` and `eth_estimateGas`.
///
/// Every quantity serializes as a hex string, matching what nodes expect.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

/// Result of `eth_feeHistory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeHistory {
    pub oldest_block: U64,
    #[serde(default)]
    pub base_fee_per_gas: Vec<U256>,
    #[serde(default)]
    pub gas_used_ratio: Vec<f64>,
    #[serde(default)]
    pub reward: Option<Vec<Vec<U256>>>,
}

/// Urgency levels for gas price selection.
///
/// Multipliers are exact rationals; monetary math never touches floating
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPriceLevel {
    /// Node-quoted price, unchanged
    Slow,
    /// +10%
    Standard,
    /// +20%
    Fast,
    /// +50%
    Rapid,
}

impl GasPriceLevel {
    /// Multiplier as a (numerator, denominator) pair.
    pub const fn multiplier(self) -> (u64, u64) {
        match self {
            GasPriceLevel::Slow => (1, 1),
            GasPriceLevel::Standard => (11, 10),
            GasPriceLevel::Fast => (12, 10),
            GasPriceLevel::Rapid => (15, 10),
        }
    }
}

// Chain ids for common networks.
pub const CHAIN_MAINNET: u64 = 1;
pub const CHAIN_GOERLI: u64 = 5;
pub const CHAIN_SEPOLIA: u64 = 11_155_111;
pub const CHAIN_OPTIMISM: u64 = 10;
pub const CHAIN_OPTIMISM_GOERLI: u64 = 420;
pub const CHAIN_ARBITRUM: u64 = 42_161;
pub const CHAIN_ARBITRUM_GOERLI: u64 = 421_613;
pub const CHAIN_POLYGON: u64 = 137;
pub const CHAIN_POLYGON_MUMBAI: u64 = 80_001;
pub const CHAIN_AVALANCHE: u64 = 43_114;
pub const CHAIN_AVALANCHE_FUJI: u64 = 43_113;
pub const CHAIN_BSC: u64 = 56;
pub const CHAIN_BSC_TESTNET: u64 = 97;
pub const CHAIN_FANTOM: u64 = 250;
pub const CHAIN_FANTOM_TESTNET: u64 = 4_002;

/// Whether a chain id belongs to a known test network.
pub fn is_testnet(chain_id: u64) -> bool {
    matches!(
        chain_id,
        CHAIN_GOERLI
            | CHAIN_SEPOLIA
            | CHAIN_OPTIMISM_GOERLI
            | CHAIN_ARBITRUM_GOERLI
            | CHAIN_POLYGON_MUMBAI
            | CHAIN_AVALANCHE_FUJI
            | CHAIN_BSC_TESTNET
            | CHAIN_FANTOM_TESTNET
    )
}

pub fn is_mainnet(chain_id: u64) -> bool {
    chain_id == CHAIN_MAINNET
}

// Standard gas limits for common operations.
pub const GAS_LIMIT_TRANSFER: u64 = 21_000;
pub const GAS_LIMIT_TOKEN_TRANSFER: u64 = 65_000;
pub const GAS_LIMIT_TOKEN_APPROVAL: u64 = 50_000;
pub const GAS_LIMIT_CONTRACT_CALL: u64 = 100_000;
pub const GAS_LIMIT_CONTRACT_DEPLOY: u64 = 500_000;
pub const GAS_LIMIT_COMPLEX_CONTRACT: u64 = 1_000_000;

// Well-known addresses.
pub const ZERO_ADDRESS: Address = Address::ZERO;
pub const BURN_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC_MAINNET: Address = address!("A0b86a33E6417c48cd7a94Ca95e70aD2c51e74f7");
pub const USDT_MAINNET: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
pub const DAI_MAINNET: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const UNISWAP_V3_ROUTER: Address = address!("E592427A0AEce92De3Edee1F18E0157C05861564");

pub fn is_zero_address(address: Address) -> bool {
    address == ZERO_ADDRESS
}

pub fn is_burn_address(address: Address) -> bool {
    address == BURN_ADDRESS
}

/// Static description of a supported network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub chain_id: u64,
    pub currency: &'static str,
    pub rpc: &'static [&'static str],
    pub explorer: &'static str,
}

const NETWORKS: &[NetworkConfig] = &[
    NetworkConfig {
        name: "Ethereum Mainnet",
        chain_id: CHAIN_MAINNET,
        currency: "ETH",
        rpc: &[
            "https://mainnet.infura.io/v3/YOUR_PROJECT_ID",
            "https://eth-mainnet.alchemyapi.io/v2/YOUR_API_KEY",
            "https://rpc.ankr.com/eth",
        ],
        explorer: "https://etherscan.io",
    },
    NetworkConfig {
        name: "Goerli Testnet",
        chain_id: CHAIN_GOERLI,
        currency: "GoerliETH",
        rpc: &[
            "https://goerli.infura.io/v3/YOUR_PROJECT_ID",
            "https://eth-goerli.alchemyapi.io/v2/YOUR_API_KEY",
        ],
        explorer: "https://goerli.etherscan.io",
    },
    NetworkConfig {
        name: "Sepolia Testnet",
        chain_id: CHAIN_SEPOLIA,
        currency: "SepoliaETH",
        rpc: &[
            "https://sepolia.infura.io/v3/YOUR_PROJECT_ID",
            "https://eth-sepolia.alchemyapi.io/v2/YOUR_API_KEY",
        ],
        explorer: "https://sepolia.etherscan.io",
    },
    NetworkConfig {
        name: "Polygon",
        chain_id: CHAIN_POLYGON,
        currency: "MATIC",
        rpc: &[
            "https://polygon-mainnet.infura.io/v3/YOUR_PROJECT_ID",
            "https://polygon-mainnet.g.alchemy.com/v2/YOUR_API_KEY",
        ],
        explorer: "https://polygonscan.com",
    },
];

/// Looks up the static configuration for a chain id.
pub fn network_config(chain_id: u64) -> Option<&'static NetworkConfig> {
    NETWORKS.iter().find(|network| network.chain_id == chain_id)
}
