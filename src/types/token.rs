//! Token amounts and denomination-aware parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Key under which a paratime's native denomination is registered.
pub const NATIVE_DENOMINATION: &str = "_";

/// Display and scaling information for one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationInfo {
    pub symbol: String,
    pub decimals: u8,
}

impl DenominationInfo {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// An amount in a denomination's base (smallest indivisible) units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUnits {
    pub amount: u128,
    pub denomination: String,
}

impl BaseUnits {
    pub fn native(amount: u128) -> Self {
        Self {
            amount,
            denomination: NATIVE_DENOMINATION.to_string(),
        }
    }
}

impl fmt::Display for BaseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.denomination)
    }
}

/// Scale a decimal amount string into base units for the given denomination.
///
/// Pure string arithmetic; floats are never involved. Rejects empty input,
/// malformed numbers, and fractional parts longer than the denomination's
/// decimal places.
pub fn parse_denomination(input: &str, denom: &DenominationInfo) -> Result<BaseUnits> {
    let cleaned = input.trim();
    if cleaned.is_empty() {
        return Err(Error::InvalidAmount(input.to_string()));
    }

    let (whole_str, frac_str) = match cleaned.find('.') {
        Some(pos) => (&cleaned[..pos], &cleaned[pos + 1..]),
        None => (cleaned, ""),
    };
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(Error::InvalidAmount(input.to_string()));
    }
    if frac_str.len() > denom.decimals as usize {
        return Err(Error::InvalidAmount(input.to_string()));
    }

    let whole: u128 = if whole_str.is_empty() {
        0
    } else {
        whole_str
            .parse()
            .map_err(|_| Error::InvalidAmount(input.to_string()))?
    };

    let scale = 10u128
        .checked_pow(denom.decimals as u32)
        .ok_or_else(|| Error::InvalidAmount(input.to_string()))?;

    let fraction: u128 = if frac_str.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_str, width = denom.decimals as usize);
        padded
            .parse()
            .map_err(|_| Error::InvalidAmount(input.to_string()))?
    };

    let amount = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| Error::InvalidAmount(input.to_string()))?;

    Ok(BaseUnits::native(amount))
}
