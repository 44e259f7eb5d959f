// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde_json::Value;

use crate::gas::{GasParseError, GasUsed};

/// One confirmed transaction as handed over by the code that submitted it.
///
/// The receipt is kept as raw JSON: a malformed receipt must only cost its
/// own report line, never the whole batch. Deserialization never fails for a
/// well-formed JSON value, see the `From<Value>` impl.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ReceiptRecord {
    pub description: String,
    pub receipt: Option<Value>,
}

impl From<Value> for ReceiptRecord {
    /// Anything that is not an object becomes a record without a receipt.
    /// A description that is not a string keeps its JSON text.
    fn from(value: Value) -> Self {
        let Value::Object(mut record) = value else {
            return Self::without_receipt(String::new());
        };
        let description = match record.remove("description") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(description)) => description,
            Some(other) => other.to_string(),
        };
        let receipt = record.remove("receipt").filter(|r| !r.is_null());
        Self {
            description,
            receipt,
        }
    }
}

impl ReceiptRecord {
    pub fn new(description: impl Into<String>, gas_used: impl Into<Value>) -> Self {
        let mut receipt = serde_json::Map::new();
        receipt.insert("gasUsed".to_string(), gas_used.into());
        Self {
            description: description.into(),
            receipt: Some(Value::Object(receipt)),
        }
    }

    pub fn with_receipt(description: impl Into<String>, receipt: Value) -> Self {
        Self {
            description: description.into(),
            receipt: Some(receipt),
        }
    }

    pub fn without_receipt(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            receipt: None,
        }
    }

    pub fn gas_used(&self) -> Result<GasUsed, GasParseError> {
        match &self.receipt {
            None | Some(Value::Null) => Err(GasParseError::MissingReceipt),
            Some(Value::Object(receipt)) => receipt
                .get("gasUsed")
                .map_or(Err(GasParseError::Missing), GasUsed::from_json),
            Some(_) => Err(GasParseError::Missing),
        }
    }
}
