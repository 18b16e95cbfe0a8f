//! Parsing, formatting and serde for [`Asset`] and [`Symbol`].
//!
//! Nodeos and Hyperion write token amounts as strings with a fixed number of
//! decimals (`"1.0000 EOS"`) and symbols as `"4,EOS"`.

use crate::types::{Asset, Symbol};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest precision an EOSIO symbol can carry.
const MAX_PRECISION: u8 = 18;

/// Longest symbol code.
const MAX_SYMBOL_CODE_LEN: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssetParseError {
    #[error("missing symbol code in {0:?}")]
    MissingSymbol(String),
    #[error("invalid symbol code {0:?}")]
    InvalidSymbol(String),
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("precision {0} exceeds 18")]
    PrecisionTooLarge(usize),
    #[error("amount {0:?} does not fit in 64 bits")]
    Overflow(String),
}

fn check_code(code: &str) -> Result<(), AssetParseError> {
    let valid = !code.is_empty()
        && code.len() <= MAX_SYMBOL_CODE_LEN
        && code.bytes().all(|b| b.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(AssetParseError::InvalidSymbol(code.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

impl Symbol {
    pub fn new(precision: u8, code: impl Into<String>) -> Self {
        Self {
            precision,
            code: code.into(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| AssetParseError::MissingSymbol(s.to_string()))?;
        let precision: u8 = precision
            .parse()
            .map_err(|_| AssetParseError::InvalidSymbol(s.to_string()))?;
        if precision > MAX_PRECISION {
            return Err(AssetParseError::PrecisionTooLarge(precision.into()));
        }
        check_code(code)?;
        Ok(Self::new(precision, code))
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Approximate value in whole tokens (useful for display and sorting).
    pub fn as_f64(&self) -> f64 {
        self.amount as f64 / 10f64.powi(i32::from(self.symbol.precision))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.symbol.precision);
        let sign = if self.amount < 0 { "-" } else { "" };
        let digits = self.amount.unsigned_abs().to_string();
        if precision == 0 {
            return write!(f, "{sign}{digits} {}", self.symbol.code);
        }
        let padded = format!("{digits:0>width$}", width = precision + 1);
        let (whole, fraction) = padded.split_at(padded.len() - precision);
        write!(f, "{sign}{whole}.{fraction} {}", self.symbol.code)
    }
}

impl FromStr for Asset {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (amount, code) = trimmed
            .split_once(' ')
            .ok_or_else(|| AssetParseError::MissingSymbol(s.to_string()))?;
        let code = code.trim();
        check_code(code)?;

        let (negative, unsigned) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(AssetParseError::InvalidAmount(amount.to_string()));
        }
        if fraction.len() > usize::from(MAX_PRECISION) {
            return Err(AssetParseError::PrecisionTooLarge(fraction.len()));
        }

        let magnitude: i64 = format!("{whole}{fraction}")
            .parse()
            .map_err(|_| AssetParseError::Overflow(amount.to_string()))?;
        let amount = if negative { -magnitude } else { magnitude };
        // fraction.len() was bounded above
        let precision = fraction.len() as u8;
        Ok(Self::new(amount, Symbol::new(precision, code)))
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_asset() {
        let asset: Asset = "1.0000 EOS".parse().expect("parse");
        assert_eq!(asset.amount, 10_000);
        assert_eq!(asset.symbol, Symbol::new(4, "EOS"));
        assert_eq!(asset.to_string(), "1.0000 EOS");
    }

    #[test]
    fn parses_small_and_negative_amounts() {
        let asset: Asset = "-0.0005 WAX".parse().expect("parse");
        assert_eq!(asset.amount, -5);
        assert_eq!(asset.to_string(), "-0.0005 WAX");

        let whole: Asset = "42 TKN".parse().expect("parse");
        assert_eq!(whole.symbol.precision, 0);
        assert_eq!(whole.to_string(), "42 TKN");
    }

    #[test]
    fn asset_as_f64() {
        let asset: Asset = "2.5000 EOS".parse().expect("parse");
        assert!((asset.as_f64() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_assets() {
        assert!(matches!(
            "1.0000".parse::<Asset>(),
            Err(AssetParseError::MissingSymbol(_))
        ));
        assert!(matches!(
            "1.0000 eos".parse::<Asset>(),
            Err(AssetParseError::InvalidSymbol(_))
        ));
        assert!(matches!(
            "1.00.00 EOS".parse::<Asset>(),
            Err(AssetParseError::InvalidAmount(_))
        ));
        assert!(matches!(
            "99999999999999999999 EOS".parse::<Asset>(),
            Err(AssetParseError::Overflow(_))
        ));
    }

    #[test]
    fn parses_symbol() {
        let symbol: Symbol = "4,EOS".parse().expect("parse");
        assert_eq!(symbol, Symbol::new(4, "EOS"));
        assert_eq!(symbol.to_string(), "4,EOS");
        assert!("19,EOS".parse::<Symbol>().is_err());
        assert!("EOS".parse::<Symbol>().is_err());
    }

    #[test]
    fn asset_serde_uses_string_form() {
        let asset: Asset = serde_json::from_str("\"10.5000 EOS\"").expect("deserialize");
        assert_eq!(asset.amount, 105_000);
        let json = serde_json::to_string(&asset).expect("serialize");
        assert_eq!(json, "\"10.5000 EOS\"");
        assert!(serde_json::from_str::<Asset>("10").is_err());
    }
}
