use alloy::primitives::{keccak256, Address, Bytes, B256, U256};

/// A single parameter of a contract call, encoded as one 32-byte ABI word.
///
/// The set of supported parameter kinds is closed on purpose: anything the
/// encoder cannot represent is rejected at compile time instead of at call
/// time. Dynamic types (strings, arrays, unsized bytes) are out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiParam {
    /// A 20-byte address, left-padded to 32 bytes.
    Address(Address),
    /// An unsigned 256-bit integer, big-endian.
    Uint(U256),
    /// A 32-byte word used verbatim.
    FixedBytes(B256),
}

impl From<Address> for AbiParam {
    fn from(address: Address) -> Self {
        AbiParam::Address(address)
    }
}

impl From<U256> for AbiParam {
    fn from(value: U256) -> Self {
        AbiParam::Uint(value)
    }
}

impl From<u64> for AbiParam {
    fn from(value: u64) -> Self {
        AbiParam::Uint(U256::from(value))
    }
}

impl From<B256> for AbiParam {
    fn from(word: B256) -> Self {
        AbiParam::FixedBytes(word)
    }
}

/// First four bytes of the keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes a function call: selector followed by one 32-byte word per
/// parameter.
pub fn encode_call(signature: &str, params: &[AbiParam]) -> Bytes {
    let mut data = Vec::with_capacity(4 + params.len() * 32);
    data.extend_from_slice(&selector(signature));
    for param in params {
        data.extend_from_slice(&encode_param(param));
    }
    Bytes::from(data)
}

fn encode_param(param: &AbiParam) -> [u8; 32] {
    match param {
        AbiParam::Address(address) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_slice());
            word
        }
        AbiParam::Uint(value) => value.to_be_bytes::<32>(),
        AbiParam::FixedBytes(word) => word.0,
    }
}
