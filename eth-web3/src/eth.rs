use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::Web3Error;
use crate::models::types::{
    Block, BlockParameter, BlockTransactions, CallRequest, FeeHistory, LogEntry, LogFilter,
    Transaction, TransactionReceipt,
};
use crate::rpc::Client;

/// Typed Ethereum method surface
///
/// One method per supported JSON-RPC method. Each adapter builds the
/// positional parameters in wire order, performs the raw call and decodes
/// the typed result; a result of unexpected shape fails with a decode error.
pub struct Eth<'a> {
    client: &'a Client,
}

impl<'a> Eth<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, Web3Error> {
        let result = self.client.call(method, params).await?;
        serde_json::from_value(result).map_err(|e| Web3Error::Decode(format!("{method}: {e}")))
    }

    /// Balance of an address in wei at the given block.
    pub async fn get_balance(
        &self,
        address: Address,
        block: BlockParameter,
    ) -> Result<U256, Web3Error> {
        self.call_as(
            "eth_getBalance",
            vec![json!(address), json!(block)],
        )
        .await
    }

    /// Number of the most recent block.
    pub async fn block_number(&self) -> Result<u64, Web3Error> {
        let number: U64 = self.call_as("eth_blockNumber", vec![]).await?;
        Ok(number.to::<u64>())
    }

    /// Current gas price quoted by the node, in wei.
    pub async fn gas_price(&self) -> Result<U256, Web3Error> {
        self.call_as("eth_gasPrice", vec![]).await
    }

    /// Transaction count (nonce) of an address at the given block.
    pub async fn get_transaction_count(
        &self,
        address: Address,
        block: BlockParameter,
    ) -> Result<u64, Web3Error> {
        let count: U64 = self
            .call_as(
                "eth_getTransactionCount",
                vec![json!(address), json!(block)],
            )
            .await?;
        Ok(count.to::<u64>())
    }

    /// Block by number or tag; `full_transactions` selects bodies over
    /// hashes. `None` when no such block exists.
    pub async fn get_block_by_number(
        &self,
        block: BlockParameter,
        full_transactions: bool,
    ) -> Result<Option<Block>, Web3Error> {
        self.call_as(
            "eth_getBlockByNumber",
            vec![json!(block), json!(full_transactions)],
        )
        .await
    }

    /// Block by hash. `None` when no such block exists.
    pub async fn get_block_by_hash(
        &self,
        block_hash: B256,
        full_transactions: bool,
    ) -> Result<Option<Block>, Web3Error> {
        self.call_as(
            "eth_getBlockByHash",
            vec![json!(block_hash), json!(full_transactions)],
        )
        .await
    }

    /// Transaction by hash. `None` when the node does not know the hash.
    pub async fn get_transaction_by_hash(
        &self,
        tx_hash: B256,
    ) -> Result<Option<Transaction>, Web3Error> {
        self.call_as("eth_getTransactionByHash", vec![json!(tx_hash)])
            .await
    }

    /// Receipt of a mined transaction. `None` while the transaction is
    /// pending or unknown.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, Web3Error> {
        self.call_as("eth_getTransactionReceipt", vec![json!(tx_hash)])
            .await
    }

    /// Broadcast a signed raw transaction, returning its hash.
    pub async fn send_raw_transaction(&self, raw: &Bytes) -> Result<B256, Web3Error> {
        self.call_as("eth_sendRawTransaction", vec![json!(raw)])
            .await
    }

    /// Ask the node to estimate the gas a call would consume.
    pub async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, Web3Error> {
        let estimate: U64 = self.call_as("eth_estimateGas", vec![json!(call)]).await?;
        Ok(estimate.to::<u64>())
    }

    /// Execute a read-only call at the given block and return its output.
    pub async fn call(
        &self,
        call: &CallRequest,
        block: BlockParameter,
    ) -> Result<Bytes, Web3Error> {
        self.call_as("eth_call", vec![json!(call), json!(block)])
            .await
    }

    /// Logs matching a filter.
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, Web3Error> {
        self.call_as("eth_getLogs", vec![json!(filter)]).await
    }

    /// Raw storage word of a contract at the given slot.
    pub async fn get_storage_at(
        &self,
        address: Address,
        slot: U256,
        block: BlockParameter,
    ) -> Result<B256, Web3Error> {
        self.call_as(
            "eth_getStorageAt",
            vec![json!(address), json!(slot), json!(block)],
        )
        .await
    }

    /// Deployed bytecode of an address.
    pub async fn get_code(
        &self,
        address: Address,
        block: BlockParameter,
    ) -> Result<Bytes, Web3Error> {
        self.call_as("eth_getCode", vec![json!(address), json!(block)])
            .await
    }

    /// Network id as a decimal string.
    pub async fn net_version(&self) -> Result<String, Web3Error> {
        self.call_as("net_version", vec![]).await
    }

    /// Client software version string of the node.
    pub async fn client_version(&self) -> Result<String, Web3Error> {
        self.call_as("web3_clientVersion", vec![]).await
    }

    /// Chain id the node is configured for.
    pub async fn chain_id(&self) -> Result<u64, Web3Error> {
        let id: U64 = self.call_as("eth_chainId", vec![]).await?;
        Ok(id.to::<u64>())
    }

    /// Node-suggested priority fee (tip) in wei.
    pub async fn max_priority_fee_per_gas(&self) -> Result<U256, Web3Error> {
        self.call_as("eth_maxPriorityFeePerGas", vec![]).await
    }

    /// Historical base fees and gas usage ratios for fee estimation.
    pub async fn fee_history(
        &self,
        block_count: u64,
        newest_block: BlockParameter,
        reward_percentiles: &[f64],
    ) -> Result<FeeHistory, Web3Error> {
        self.call_as(
            "eth_feeHistory",
            vec![
                json!(U64::from(block_count)),
                json!(newest_block),
                json!(reward_percentiles),
            ],
        )
        .await
    }

    /// Transactions currently in the pending block, with full bodies.
    pub async fn get_pending_transactions(&self) -> Result<Vec<Transaction>, Web3Error> {
        let block = self
            .get_block_by_number(BlockParameter::Pending, true)
            .await?;

        Ok(match block.map(|block| block.transactions) {
            Some(BlockTransactions::Full(transactions)) => transactions,
            _ => Vec::new(),
        })
    }

    /// Number of transactions in the pending block.
    pub async fn get_pending_transaction_count(&self) -> Result<usize, Web3Error> {
        Ok(self.get_pending_transactions().await?.len())
    }

    /// Pending transactions sent from or to the given address.
    pub async fn get_account_pending_transactions(
        &self,
        address: Address,
    ) -> Result<Vec<Transaction>, Web3Error> {
        let pending = self.get_pending_transactions().await?;
        Ok(pending
            .into_iter()
            .filter(|tx| tx.from == address || tx.to == Some(address))
            .collect())
    }

    /// Whether a transaction hash is currently in the pending block.
    pub async fn is_pending_transaction(&self, tx_hash: B256) -> Result<bool, Web3Error> {
        let pending = self.get_pending_transactions().await?;
        Ok(pending.iter().any(|tx| tx.hash == tx_hash))
    }
}
