use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;

use crate::error::Web3Error;

/// Denominations of the native currency
///
/// Every unit is a power-of-ten multiple of wei. Parsing from a string is
/// case-insensitive and accepts the historical aliases (shannon, szabo,
/// finney, ...); an unrecognized name is an error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
    Kether,
    Mether,
    Gether,
    Tether,
}

impl Unit {
    /// Every unit, smallest first. Mostly useful for iterating in tests.
    pub const ALL: [Unit; 11] = [
        Unit::Wei,
        Unit::Kwei,
        Unit::Mwei,
        Unit::Gwei,
        Unit::Szabo,
        Unit::Finney,
        Unit::Ether,
        Unit::Kether,
        Unit::Mether,
        Unit::Gether,
        Unit::Tether,
    ];

    /// Power of ten relating this unit to wei.
    pub const fn exponent(self) -> u32 {
        match self {
            Unit::Wei => 0,
            Unit::Kwei => 3,
            Unit::Mwei => 6,
            Unit::Gwei => 9,
            Unit::Szabo => 12,
            Unit::Finney => 15,
            Unit::Ether => 18,
            Unit::Kether => 21,
            Unit::Mether => 24,
            Unit::Gether => 27,
            Unit::Tether => 30,
        }
    }

    /// Canonical unit name.
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Wei => "wei",
            Unit::Kwei => "kwei",
            Unit::Mwei => "mwei",
            Unit::Gwei => "gwei",
            Unit::Szabo => "szabo",
            Unit::Finney => "finney",
            Unit::Ether => "ether",
            Unit::Kether => "kether",
            Unit::Mether => "mether",
            Unit::Gether => "gether",
            Unit::Tether => "tether",
        }
    }

    /// `10^exponent` as a 256-bit integer.
    fn multiplier(self) -> U256 {
        U256::from(10u64).pow(U256::from(self.exponent()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = Web3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wei" => Ok(Unit::Wei),
            "kwei" | "babbage" | "femtoether" => Ok(Unit::Kwei),
            "mwei" | "lovelace" | "picoether" => Ok(Unit::Mwei),
            "gwei" | "shannon" | "nanoether" | "nano" => Ok(Unit::Gwei),
            "szabo" | "microether" | "micro" => Ok(Unit::Szabo),
            "finney" | "milliether" | "milli" => Ok(Unit::Finney),
            "ether" | "eth" => Ok(Unit::Ether),
            "kether" | "grand" => Ok(Unit::Kether),
            "mether" => Ok(Unit::Mether),
            "gether" => Ok(Unit::Gether),
            "tether" => Ok(Unit::Tether),
            _ => Err(Web3Error::UnknownUnit(s.to_string())),
        }
    }
}

/// Parses a decimal string into its smallest-unit integer representation.
///
/// `value` must be an optionally signed decimal with at most one point and at
/// least one digit; exponent notation and separators are rejected. The result
/// is `value * 10^decimals` computed exactly on decimal digits, so amounts
/// with 18+ significant digits survive untouched. Fractional digits beyond
/// `decimals` are truncated toward zero, dropping sub-smallest-unit dust.
pub fn parse_units(value: &str, decimals: u32) -> Result<U256, Web3Error> {
    let invalid = || Web3Error::InvalidNumberFormat(value.to_string());

    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (digits, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| invalid())?
    };

    // Keep only the digits the target precision can represent.
    let kept = &frac_part[..frac_part.len().min(decimals as usize)];
    let fraction = if kept.is_empty() {
        U256::ZERO
    } else {
        let rescale = U256::from(10u64).pow(U256::from(decimals as usize - kept.len()));
        U256::from_str_radix(kept, 10)
            .map_err(|_| invalid())?
            .checked_mul(rescale)
            .ok_or_else(invalid)?
    };

    let amount = whole
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| {
            Web3Error::InvalidNumberFormat(format!("{value} does not fit in 256 bits"))
        })?;

    // Wei amounts are unsigned; only a zero magnitude may carry a minus sign.
    if negative && !amount.is_zero() {
        return Err(Web3Error::InvalidNumberFormat(format!(
            "negative amount {value} is not representable in wei"
        )));
    }

    Ok(amount)
}

/// Formats a smallest-unit integer as an exact decimal string.
///
/// The division is exact integer arithmetic; every significant digit of the
/// fractional part is preserved and trailing zeros are trimmed. A whole
/// number formats without a decimal point, zero formats as `"0"`.
pub fn format_units(value: U256, decimals: u32) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let quotient = value / scale;
    let remainder = value % scale;

    if remainder.is_zero() {
        return quotient.to_string();
    }

    let fraction = format!("{remainder}");
    let fraction = format!("{:0>width$}", fraction, width = decimals as usize);
    format!("{quotient}.{}", fraction.trim_end_matches('0'))
}

/// Converts a decimal amount in `unit` to wei.
pub fn to_wei(value: &str, unit: Unit) -> Result<U256, Web3Error> {
    parse_units(value, unit.exponent())
}

/// Formats a wei amount in `unit`.
///
/// An absent amount formats as `"0"`; this mirrors the defensive default of
/// callers formatting a balance that may not exist yet.
pub fn from_wei(wei: Option<U256>, unit: Unit) -> String {
    match wei {
        Some(wei) => format_units(wei, unit.exponent()),
        None => "0".to_string(),
    }
}
