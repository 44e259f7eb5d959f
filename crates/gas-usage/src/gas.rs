// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, iter::Sum, ops::AddAssign, str::FromStr};

use bigdecimal::{num_bigint::BigUint, Zero};
use serde_json::Value;
use thiserror::Error;

/// Amount of gas consumed by one or more transactions.
///
/// Unbounded, so summing any number of receipts can never overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GasUsed(BigUint);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GasParseError {
    #[error("record has no receipt")]
    MissingReceipt,
    #[error("receipt has no gasUsed value")]
    Missing,
    #[error("gasUsed is empty")]
    Empty,
    #[error("gasUsed cannot be negative: {0}")]
    Negative(String),
    #[error("gasUsed is not a decimal integer: {0}")]
    InvalidDecimal(String),
    #[error("gasUsed is not a hex quantity: {0}")]
    InvalidHex(String),
    #[error("gasUsed is not an integer: {0}")]
    NotAnInteger(String),
    #[error("gasUsed has unsupported type {0}")]
    UnsupportedType(&'static str),
}

impl GasUsed {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses the loosely typed `gasUsed` field of a receipt.
    ///
    /// Strings may be decimal or `0x` prefixed hex, numbers must be
    /// non-negative integers, and serialized big-number objects are read
    /// through their `hex` (or `_hex`) field.
    pub fn from_json(value: &Value) -> Result<Self, GasParseError> {
        match value {
            Value::Null => Err(GasParseError::Missing),
            Value::String(s) => s.parse(),
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Ok(Self::from(v))
                } else if n.as_i64().is_some() {
                    Err(GasParseError::Negative(n.to_string()))
                } else {
                    Err(GasParseError::NotAnInteger(n.to_string()))
                }
            }
            Value::Object(map) => match map.get("hex").or_else(|| map.get("_hex")) {
                Some(Value::String(hex)) => hex.parse(),
                _ => Err(GasParseError::UnsupportedType("object")),
            },
            Value::Bool(_) => Err(GasParseError::UnsupportedType("bool")),
            Value::Array(_) => Err(GasParseError::UnsupportedType("array")),
        }
    }
}

impl FromStr for GasUsed {
    type Err = GasParseError;

    /// Surrounding whitespace is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(GasParseError::Empty);
        }
        if s.starts_with('-') {
            return Err(GasParseError::Negative(s.to_string()));
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(GasParseError::InvalidHex(s.to_string()));
            }
            return BigUint::parse_bytes(hex.as_bytes(), 16)
                .map(Self)
                .ok_or_else(|| GasParseError::InvalidHex(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GasParseError::InvalidDecimal(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| GasParseError::InvalidDecimal(s.to_string()))
    }
}

impl fmt::Display for GasUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for GasUsed {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl AddAssign<&GasUsed> for GasUsed {
    fn add_assign(&mut self, rhs: &GasUsed) {
        self.0 += &rhs.0;
    }
}

impl<'a> Sum<&'a GasUsed> for GasUsed {
    fn sum<I: Iterator<Item = &'a GasUsed>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, gas| {
            acc += gas;
            acc
        })
    }
}
