//! Caller-supplied amounts
//!
//! Presentation layers hand over whatever the user typed. Parsing happens
//! here, before any unit is looked up, so a bad amount is always reported
//! as `InvalidNumber` regardless of the unit names.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// A numeric input that is either already a number or still text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Number(value as f64)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse an amount into a finite `f64`
pub fn parse_amount(amount: &Amount) -> Result<f64, ConversionError> {
    let value = match amount {
        Amount::Number(n) => *n,
        Amount::Text(s) => s.trim().parse::<f64>().map_err(|_| ConversionError::InvalidNumber {
            input: s.clone(),
        })?,
    };

    // "inf", "NaN" and overflowing literals parse fine but are not amounts
    if !value.is_finite() {
        return Err(ConversionError::InvalidNumber { input: amount.to_string() });
    }

    Ok(value)
}
