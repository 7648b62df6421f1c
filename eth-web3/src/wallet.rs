use std::time::Duration;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use tracing::{debug, info, instrument};

use crate::erc20;
use crate::error::Web3Error;
use crate::eth::Eth;
use crate::models::types::{BlockParameter, CallRequest, GasPriceLevel, TransactionReceipt};
use crate::rpc::Client;
use crate::transaction::{
    private_key_from_hex, sign_eip1559_transaction, sign_transaction, Eip1559TransactionParams,
    TransactionParams,
};
use crate::units::{to_wei, Unit};

/// A funded account bound to a client: signs locally, broadcasts remotely.
pub struct Wallet {
    signer: PrivateKeySigner,
    address: Address,
    client: Client,
}

/// Options for a wallet transfer.
///
/// A zero `gas_limit` asks the node for an estimate (with a 10% buffer); an
/// absent `gas_price` uses the node's current quote.
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    pub to: Option<Address>,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: Option<U256>,
    pub data: Bytes,
}

/// What a wallet send returns once the transaction is broadcast.
#[derive(Debug, Clone)]
pub struct SendTransactionResult {
    pub transaction_hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
}

impl Wallet {
    /// Wallet from a hex-encoded private key.
    pub fn new(private_key_hex: &str, client: Client) -> Result<Self, Web3Error> {
        let signer = private_key_from_hex(private_key_hex)?;
        let address = signer.address();
        Ok(Self {
            signer,
            address,
            client,
        })
    }

    /// Wallet with a freshly generated key.
    pub fn create(client: Client) -> Self {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        Self {
            signer,
            address,
            client,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Hex form of the wallet's private key, 0x-prefixed.
    pub fn private_key_hex(&self) -> String {
        crate::transaction::private_key_to_hex(&self.signer)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn eth(&self) -> Eth<'_> {
        self.client.eth()
    }

    /// Balance of the wallet address at the latest block.
    pub async fn balance(&self) -> Result<U256, Web3Error> {
        self.eth()
            .get_balance(self.address, BlockParameter::Latest)
            .await
    }

    /// Next nonce, counted against the pending block.
    pub async fn nonce(&self) -> Result<u64, Web3Error> {
        self.eth()
            .get_transaction_count(self.address, BlockParameter::Pending)
            .await
    }

    /// Sign and broadcast a legacy transaction.
    ///
    /// Fills in what the options leave open: gas limit from the node's
    /// estimate plus 10%, gas price from the node's quote, chain id from the
    /// node, nonce from the pending count.
    #[instrument(skip(self, opts), err)]
    pub async fn send_transaction(
        &self,
        opts: TransferOptions,
    ) -> Result<SendTransactionResult, Web3Error> {
        let mut opts = opts;

        if opts.gas_limit == 0 {
            let estimate = self
                .eth()
                .estimate_gas(&self.transfer_call(&opts))
                .await?;
            opts.gas_limit = estimate + estimate * 10 / 100;
            debug!(gas_limit = opts.gas_limit, "estimated gas with buffer");
        }

        let gas_price = match opts.gas_price {
            Some(gas_price) => gas_price,
            None => self.eth().gas_price().await?,
        };

        let chain_id = self.eth().chain_id().await?;
        let nonce = self.nonce().await?;

        let mut params = TransactionParams::new()
            .value(opts.value)
            .gas(opts.gas_limit)
            .gas_price(gas_price)
            .data(opts.data.clone())
            .nonce(nonce)
            .chain_id(chain_id);
        params.to = opts.to;

        let signed = sign_transaction(&params, &self.signer)?;
        let tx_hash = self.eth().send_raw_transaction(&signed.raw).await?;
        info!(%tx_hash, "transaction broadcast");

        Ok(SendTransactionResult {
            transaction_hash: tx_hash,
            from: self.address,
            to: opts.to,
            value: opts.value,
        })
    }

    /// Send a decimal ether amount to an address.
    pub async fn send_ether(
        &self,
        to: Address,
        amount_ether: &str,
    ) -> Result<SendTransactionResult, Web3Error> {
        let value = to_wei(amount_ether, Unit::Ether)?;
        self.send_transaction(TransferOptions {
            to: Some(to),
            value,
            ..Default::default()
        })
        .await
    }

    /// Send an exact wei amount to an address.
    pub async fn send_wei(
        &self,
        to: Address,
        amount_wei: U256,
    ) -> Result<SendTransactionResult, Web3Error> {
        self.send_transaction(TransferOptions {
            to: Some(to),
            value: amount_wei,
            ..Default::default()
        })
        .await
    }

    /// Sign and broadcast an EIP-1559 transaction with the given fee caps.
    #[instrument(skip(self, opts, max_fee_per_gas, max_priority_fee_per_gas), err)]
    pub async fn send_eip1559_transaction(
        &self,
        opts: TransferOptions,
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    ) -> Result<SendTransactionResult, Web3Error> {
        let mut opts = opts;

        if opts.gas_limit == 0 {
            let estimate = self
                .eth()
                .estimate_gas(&self.transfer_call(&opts))
                .await?;
            opts.gas_limit = estimate + estimate * 10 / 100;
        }

        let chain_id = self.eth().chain_id().await?;
        let nonce = self.nonce().await?;

        let mut params = Eip1559TransactionParams::new()
            .value(opts.value)
            .gas(opts.gas_limit)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .data(opts.data.clone())
            .nonce(nonce)
            .chain_id(chain_id);
        params.to = opts.to;

        let signed = sign_eip1559_transaction(&params, &self.signer)?;
        let tx_hash = self.eth().send_raw_transaction(&signed.raw).await?;
        info!(%tx_hash, "EIP-1559 transaction broadcast");

        Ok(SendTransactionResult {
            transaction_hash: tx_hash,
            from: self.address,
            to: opts.to,
            value: opts.value,
        })
    }

    /// Read-only contract call from the wallet address at the latest block.
    pub async fn call_contract(
        &self,
        contract: Address,
        method_data: Bytes,
    ) -> Result<Bytes, Web3Error> {
        let call = CallRequest {
            from: Some(self.address),
            to: Some(contract),
            data: Some(method_data),
            ..Default::default()
        };
        self.eth().call(&call, BlockParameter::Latest).await
    }

    /// State-changing contract call, optionally attaching value.
    pub async fn send_contract_transaction(
        &self,
        contract: Address,
        method_data: Bytes,
        value: U256,
    ) -> Result<SendTransactionResult, Web3Error> {
        self.send_transaction(TransferOptions {
            to: Some(contract),
            value,
            data: method_data,
            ..Default::default()
        })
        .await
    }

    /// Deploy a contract: payload is bytecode plus encoded constructor
    /// arguments. A zero gas limit estimates with a 20% buffer.
    pub async fn deploy_contract(
        &self,
        bytecode: &[u8],
        constructor_data: &[u8],
        gas_limit: u64,
        gas_price: Option<U256>,
    ) -> Result<SendTransactionResult, Web3Error> {
        let mut payload = Vec::with_capacity(bytecode.len() + constructor_data.len());
        payload.extend_from_slice(bytecode);
        payload.extend_from_slice(constructor_data);
        let data = Bytes::from(payload);

        let gas_limit = if gas_limit == 0 {
            let call = CallRequest {
                from: Some(self.address),
                data: Some(data.clone()),
                ..Default::default()
            };
            let estimate = self.eth().estimate_gas(&call).await?;
            estimate + estimate * 20 / 100
        } else {
            gas_limit
        };

        let gas_price = match gas_price {
            Some(gas_price) => gas_price,
            None => self.eth().gas_price().await?,
        };

        self.send_transaction(TransferOptions {
            to: None,
            value: U256::ZERO,
            gas_limit,
            gas_price: Some(gas_price),
            data,
        })
        .await
    }

    /// Poll for a transaction receipt until one exists.
    ///
    /// Sleeps `poll_interval` between polls. The loop is bounded only by
    /// the caller's cancellation: drop the future or wrap it in
    /// `tokio::time::timeout` for a deadline.
    pub async fn wait_for_transaction(
        &self,
        tx_hash: B256,
        poll_interval: Duration,
    ) -> Result<TransactionReceipt, Web3Error> {
        loop {
            if let Some(receipt) = self.eth().get_transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// ERC-20 balance of `owner` on `token`.
    pub async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, Web3Error> {
        let output = self
            .call_contract(token, erc20::encode_balance_of(owner))
            .await?;
        decode_uint_output("balanceOf", &output)
    }

    /// ERC-20 allowance granted by `owner` to `spender` on `token`.
    pub async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, Web3Error> {
        let output = self
            .call_contract(token, erc20::encode_allowance(owner, spender))
            .await?;
        decode_uint_output("allowance", &output)
    }

    fn transfer_call(&self, opts: &TransferOptions) -> CallRequest {
        CallRequest {
            from: Some(self.address),
            to: opts.to,
            value: Some(opts.value),
            data: if opts.data.is_empty() {
                None
            } else {
                Some(opts.data.clone())
            },
            ..Default::default()
        }
    }
}

fn decode_uint_output(method: &str, output: &Bytes) -> Result<U256, Web3Error> {
    if output.len() > 32 {
        return Err(Web3Error::Decode(format!(
            "{method}: expected a single 256-bit word, got {} bytes",
            output.len()
        )));
    }
    Ok(U256::from_be_slice(output))
}

/// Gas price adjusted for the requested urgency level.
///
/// The multiplication is exact integer arithmetic on the rational pair, so
/// no rounding error creeps into the monetary value.
pub async fn optimal_gas_price(
    client: &Client,
    level: GasPriceLevel,
) -> Result<U256, Web3Error> {
    let base = client.eth().gas_price().await?;
    let (numerator, denominator) = level.multiplier();
    Ok(base * U256::from(numerator) / U256::from(denominator))
}

/// Node gas estimate inflated by an integer percentage.
pub async fn estimate_gas_with_buffer(
    client: &Client,
    call: &CallRequest,
    buffer_percent: u64,
) -> Result<u64, Web3Error> {
    let estimate = client.eth().estimate_gas(call).await?;
    Ok(estimate + estimate * buffer_percent / 100)
}

/// Worst-case fee of a transaction: gas limit times gas price, in wei.
pub fn transaction_fee(gas_limit: u64, gas_price: U256) -> U256 {
    U256::from(gas_limit) * gas_price
}
