//! ERC-20 call-data builders on top of the minimal ABI encoder.

use alloy::primitives::{Address, Bytes, U256};

use crate::abi::{encode_call, AbiParam};

pub const FUNC_BALANCE_OF: &str = "balanceOf(address)";
pub const FUNC_TRANSFER: &str = "transfer(address,uint256)";
pub const FUNC_TRANSFER_FROM: &str = "transferFrom(address,address,uint256)";
pub const FUNC_APPROVE: &str = "approve(address,uint256)";
pub const FUNC_ALLOWANCE: &str = "allowance(address,address)";
pub const FUNC_TOTAL_SUPPLY: &str = "totalSupply()";
pub const FUNC_NAME: &str = "name()";
pub const FUNC_SYMBOL: &str = "symbol()";
pub const FUNC_DECIMALS: &str = "decimals()";

/// Calldata for `transfer(to, amount)`.
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    encode_call(
        FUNC_TRANSFER,
        &[AbiParam::Address(to), AbiParam::Uint(amount)],
    )
}

/// Calldata for `transferFrom(from, to, amount)`.
pub fn encode_transfer_from(from: Address, to: Address, amount: U256) -> Bytes {
    encode_call(
        FUNC_TRANSFER_FROM,
        &[
            AbiParam::Address(from),
            AbiParam::Address(to),
            AbiParam::Uint(amount),
        ],
    )
}

/// Calldata for `approve(spender, amount)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    encode_call(
        FUNC_APPROVE,
        &[AbiParam::Address(spender), AbiParam::Uint(amount)],
    )
}

/// Calldata for `allowance(owner, spender)`.
pub fn encode_allowance(owner: Address, spender: Address) -> Bytes {
    encode_call(
        FUNC_ALLOWANCE,
        &[AbiParam::Address(owner), AbiParam::Address(spender)],
    )
}

/// Calldata for `balanceOf(owner)`.
pub fn encode_balance_of(owner: Address) -> Bytes {
    encode_call(FUNC_BALANCE_OF, &[AbiParam::Address(owner)])
}

/// Calldata for `totalSupply()`.
pub fn encode_total_supply() -> Bytes {
    encode_call(FUNC_TOTAL_SUPPLY, &[])
}
