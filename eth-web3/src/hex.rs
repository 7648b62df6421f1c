use alloy::primitives::{Address, U256};

use crate::error::Web3Error;

/// Values that have a canonical `0x`-prefixed lower-case hex form.
///
/// This is the compile-time counterpart of a runtime type switch: integers
/// encode as their minimal hex digits, byte sequences encode byte-for-byte,
/// and strings get the special-cased treatment described on [`to_hex`].
pub trait ToHex {
    fn to_hex(&self) -> String;
}

impl ToHex for u64 {
    fn to_hex(&self) -> String {
        format!("0x{self:x}")
    }
}

impl ToHex for u128 {
    fn to_hex(&self) -> String {
        format!("0x{self:x}")
    }
}

impl ToHex for U256 {
    fn to_hex(&self) -> String {
        format!("0x{self:x}")
    }
}

impl ToHex for [u8] {
    fn to_hex(&self) -> String {
        format!("0x{}", alloy_primitives::hex::encode(self))
    }
}

impl<const N: usize> ToHex for [u8; N] {
    fn to_hex(&self) -> String {
        self.as_slice().to_hex()
    }
}

impl ToHex for Vec<u8> {
    fn to_hex(&self) -> String {
        self.as_slice().to_hex()
    }
}

impl ToHex for str {
    fn to_hex(&self) -> String {
        // Already-encoded values pass through unchanged.
        if self.starts_with("0x") {
            return self.to_string();
        }
        // A plain decimal string is a number; anything else is raw bytes.
        if let Ok(value) = U256::from_str_radix(self, 10) {
            return value.to_hex();
        }
        self.as_bytes().to_hex()
    }
}

impl ToHex for String {
    fn to_hex(&self) -> String {
        self.as_str().to_hex()
    }
}

/// Encodes a value as canonical `0x`-prefixed lower-case hex.
///
/// Integers use their minimal digits (zero encodes as `0x0`), byte sequences
/// encode byte-for-byte, and strings are passed through when already
/// `0x`-prefixed, parsed base-10 when numeric, or encoded as UTF-8 bytes
/// otherwise.
pub fn to_hex<T: ToHex + ?Sized>(value: &T) -> String {
    value.to_hex()
}

/// Parses a `0x`-prefixed hex string into a 256-bit integer.
///
/// The prefix is mandatory; invalid digits after it are fatal for the call.
pub fn from_hex(hex: &str) -> Result<U256, Web3Error> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| Web3Error::MalformedHex(format!("{hex} must start with 0x")))?;

    U256::from_str_radix(digits, 16)
        .map_err(|e| Web3Error::MalformedHex(format!("{hex}: {e}")))
}

/// Checks the shape of an address string: `0x` prefix plus 40 hex digits.
///
/// This is a pure length/charset check; EIP-55 checksum casing is not
/// verified.
pub fn is_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses an address string, failing with [`Web3Error::InvalidAddress`].
pub fn parse_address(address: &str) -> Result<Address, Web3Error> {
    if !is_address(address) {
        return Err(Web3Error::InvalidAddress(address.to_string()));
    }
    address
        .parse::<Address>()
        .map_err(|e| Web3Error::InvalidAddress(format!("{address}: {e}")))
}

/// Prepends `pad` until `value` is at least `length` characters long.
///
/// Padding is applied one whole `pad` unit per iteration and lengths are
/// counted in characters. An empty pad string returns the input unchanged.
pub fn pad_left(value: &str, length: usize, pad: &str) -> String {
    let mut out = value.to_string();
    if pad.is_empty() {
        return out;
    }
    while out.chars().count() < length {
        out.insert_str(0, pad);
    }
    out
}

/// Appends `pad` until `value` is at least `length` characters long.
pub fn pad_right(value: &str, length: usize, pad: &str) -> String {
    let mut out = value.to_string();
    if pad.is_empty() {
        return out;
    }
    while out.chars().count() < length {
        out.push_str(pad);
    }
    out
}
