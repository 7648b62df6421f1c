use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::{Decodable2718, Encodable2718};
use alloy::eips::eip2930::AccessList;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, B256, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;

use crate::error::Web3Error;
use crate::units::{to_wei, Unit};

/// Parameters of a legacy (gas-priced) transaction, built via chained
/// setters and consumed by [`sign_transaction`].
///
/// Defaults: zero value, empty calldata, chain id 1. The nonce is the
/// caller's responsibility; re-signing the same builder without bumping it
/// produces the same replaceable transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: Option<U256>,
    pub nonce: u64,
    pub chain_id: u64,
    pub data: Bytes,
}

impl TransactionParams {
    pub fn new() -> Self {
        Self {
            to: None,
            value: U256::ZERO,
            gas: 0,
            gas_price: None,
            nonce: 0,
            chain_id: 1,
            data: Bytes::new(),
        }
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Value from a decimal wei string.
    pub fn value_wei(mut self, wei: &str) -> Result<Self, Web3Error> {
        self.value = to_wei(wei, Unit::Wei)?;
        Ok(self)
    }

    /// Value from a decimal ether string.
    pub fn value_ether(mut self, ether: &str) -> Result<Self, Web3Error> {
        self.value = to_wei(ether, Unit::Ether)?;
        Ok(self)
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Gas price from a decimal gwei string.
    pub fn gas_price_gwei(mut self, gwei: &str) -> Result<Self, Web3Error> {
        self.gas_price = Some(to_wei(gwei, Unit::Gwei)?);
        Ok(self)
    }

    pub fn data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }

    /// Calldata from a hex string, with or without the 0x prefix.
    pub fn data_from_hex(mut self, data: &str) -> Result<Self, Web3Error> {
        self.data = alloy_primitives::hex::decode(data)
            .map_err(|e| Web3Error::MalformedHex(format!("{data}: {e}")))?
            .into();
        Ok(self)
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

impl Default for TransactionParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of an EIP-1559 (type 2) transaction.
#[derive(Debug, Clone)]
pub struct Eip1559TransactionParams {
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    pub nonce: u64,
    pub chain_id: u64,
    pub data: Bytes,
}

impl Eip1559TransactionParams {
    pub fn new() -> Self {
        Self {
            to: None,
            value: U256::ZERO,
            gas: 0,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            nonce: 0,
            chain_id: 1,
            data: Bytes::new(),
        }
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn value_ether(mut self, ether: &str) -> Result<Self, Web3Error> {
        self.value = to_wei(ether, Unit::Ether)?;
        Ok(self)
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn max_fee_per_gas(mut self, max_fee: U256) -> Self {
        self.max_fee_per_gas = Some(max_fee);
        self
    }

    pub fn max_priority_fee_per_gas(mut self, max_priority_fee: U256) -> Self {
        self.max_priority_fee_per_gas = Some(max_priority_fee);
        self
    }

    pub fn data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

impl Default for Eip1559TransactionParams {
    fn default() -> Self {
        Self::new()
    }
}

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    /// Keccak-256 hash of the signed payload
    pub hash: B256,
    /// Network-ready encoded bytes
    pub raw: Bytes,
}

/// Parse a secp256k1 private key from hex, with or without the 0x prefix.
pub fn private_key_from_hex(hex_key: &str) -> Result<PrivateKeySigner, Web3Error> {
    let stripped = hex_key.strip_prefix("0x").unwrap_or(hex_key);
    stripped
        .parse::<PrivateKeySigner>()
        .map_err(|e| Web3Error::Signing(format!("invalid private key: {e}")))
}

/// Generate a random private key.
pub fn generate_private_key() -> PrivateKeySigner {
    PrivateKeySigner::random()
}

/// Hex form of a private key, 0x-prefixed.
pub fn private_key_to_hex(signer: &PrivateKeySigner) -> String {
    format!("0x{:x}", signer.to_bytes())
}

/// Sign a legacy transaction.
///
/// Required fields are checked before any cryptography so a missing field
/// fails with a descriptive error instead of whatever the signing library
/// would report: a recipient (absent only for a contract deployment, i.e.
/// when calldata is present), a gas price and a non-zero gas limit.
pub fn sign_transaction(
    params: &TransactionParams,
    signer: &PrivateKeySigner,
) -> Result<SignedTransaction, Web3Error> {
    if params.to.is_none() && params.data.is_empty() {
        return Err(Web3Error::MissingField("to"));
    }
    let gas_price = params.gas_price.ok_or(Web3Error::MissingField("gasPrice"))?;
    if params.gas == 0 {
        return Err(Web3Error::MissingField("gas"));
    }

    let mut tx = TxLegacy {
        chain_id: Some(params.chain_id),
        nonce: params.nonce,
        gas_price: lower_fee(gas_price, "gasPrice")?,
        gas_limit: params.gas,
        to: params.to.map_or(TxKind::Create, TxKind::Call),
        value: params.value,
        input: params.data.clone(),
    };

    let signature = signer
        .sign_transaction_sync(&mut tx)
        .map_err(|e| Web3Error::Signing(e.to_string()))?;
    let signed = tx.into_signed(signature);
    let hash = *signed.hash();
    let raw = TxEnvelope::from(signed).encoded_2718();

    Ok(SignedTransaction {
        hash,
        raw: raw.into(),
    })
}

/// Sign an EIP-1559 transaction. Both fee fields are required.
pub fn sign_eip1559_transaction(
    params: &Eip1559TransactionParams,
    signer: &PrivateKeySigner,
) -> Result<SignedTransaction, Web3Error> {
    if params.to.is_none() && params.data.is_empty() {
        return Err(Web3Error::MissingField("to"));
    }
    let max_fee = params
        .max_fee_per_gas
        .ok_or(Web3Error::MissingField("maxFeePerGas"))?;
    let max_priority_fee = params
        .max_priority_fee_per_gas
        .ok_or(Web3Error::MissingField("maxPriorityFeePerGas"))?;
    if params.gas == 0 {
        return Err(Web3Error::MissingField("gas"));
    }

    let mut tx = TxEip1559 {
        chain_id: params.chain_id,
        nonce: params.nonce,
        gas_limit: params.gas,
        max_fee_per_gas: lower_fee(max_fee, "maxFeePerGas")?,
        max_priority_fee_per_gas: lower_fee(max_priority_fee, "maxPriorityFeePerGas")?,
        to: params.to.map_or(TxKind::Create, TxKind::Call),
        value: params.value,
        access_list: AccessList::default(),
        input: params.data.clone(),
    };

    let signature = signer
        .sign_transaction_sync(&mut tx)
        .map_err(|e| Web3Error::Signing(e.to_string()))?;
    let signed = tx.into_signed(signature);
    let hash = *signed.hash();
    let raw = TxEnvelope::from(signed).encoded_2718();

    Ok(SignedTransaction {
        hash,
        raw: raw.into(),
    })
}

fn lower_fee(value: U256, field: &str) -> Result<u128, Web3Error> {
    u128::try_from(value).map_err(|_| Web3Error::Signing(format!("{field} exceeds 128 bits")))
}

/// Recover the sender address of a raw signed transaction.
///
/// The scheme is determined by the decoded payload: a legacy transaction
/// without an embedded chain id recovers under the pre-EIP-155 rules, one
/// with a chain id under EIP-155, and typed transactions under their own
/// signing hash. All of that branching lives in the decoding library.
pub fn recover_signer(raw_tx_hex: &str) -> Result<Address, Web3Error> {
    let raw = alloy_primitives::hex::decode(raw_tx_hex)
        .map_err(|e| Web3Error::MalformedHex(format!("{raw_tx_hex}: {e}")))?;

    let envelope = TxEnvelope::decode_2718(&mut raw.as_slice())
        .map_err(|e| Web3Error::Signing(format!("failed to decode transaction: {e}")))?;

    let recovered = match &envelope {
        TxEnvelope::Legacy(signed) => signed.recover_signer(),
        TxEnvelope::Eip2930(signed) => signed.recover_signer(),
        TxEnvelope::Eip1559(signed) => signed.recover_signer(),
        TxEnvelope::Eip4844(signed) => signed.recover_signer(),
        TxEnvelope::Eip7702(signed) => signed.recover_signer(),
        _ => return Err(Web3Error::Signing("unsupported transaction type".into())),
    };

    recovered.map_err(|e| Web3Error::Signing(format!("failed to recover sender: {e}")))
}

/// Sign a contract deployment: recipient cleared, payload is the bytecode
/// followed by encoded constructor arguments.
pub fn create_contract_deployment(
    bytecode: &[u8],
    constructor_data: &[u8],
    signer: &PrivateKeySigner,
    params: TransactionParams,
) -> Result<SignedTransaction, Web3Error> {
    let mut payload = Vec::with_capacity(bytecode.len() + constructor_data.len());
    payload.extend_from_slice(bytecode);
    payload.extend_from_slice(constructor_data);

    let mut params = params;
    params.to = None;
    params.data = payload.into();

    sign_transaction(&params, signer)
}

/// Sign a contract call with pre-encoded method data.
pub fn create_contract_call(
    contract: Address,
    method_data: Bytes,
    signer: &PrivateKeySigner,
    params: TransactionParams,
) -> Result<SignedTransaction, Web3Error> {
    sign_transaction(&params.to(contract).data(method_data), signer)
}
