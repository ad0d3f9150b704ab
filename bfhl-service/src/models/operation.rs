//! Decoding of the single-key request body into a typed operation.

use crate::error::BfhlError;
use serde_json::Value;

/// One `/bfhl` request, already validated for its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Number of terms requested. Non-positive counts are allowed.
    Fibonacci(i64),
    /// Integer candidates only; non-integer elements were dropped at decode time.
    Prime(Vec<i128>),
    /// Never empty.
    Lcm(Vec<i128>),
    /// Never empty.
    Hcf(Vec<i128>),
    Ai(String),
}

impl Operation {
    /// Decode a request body.
    ///
    /// Anything other than an object with exactly one key is `InvalidShape`;
    /// the key is matched case-sensitively.
    pub fn parse(body: Value) -> Result<Self, BfhlError> {
        let Value::Object(map) = body else {
            return Err(BfhlError::InvalidShape);
        };
        if map.len() != 1 {
            return Err(BfhlError::InvalidShape);
        }
        let Some((key, value)) = map.into_iter().next() else {
            return Err(BfhlError::InvalidShape);
        };

        match key.as_str() {
            // counts past i64 saturate; the term limit rejects them later
            "fibonacci" => as_integer(&value)
                .map(|n| {
                    Operation::Fibonacci(
                        i64::try_from(n).unwrap_or(if n > 0 { i64::MAX } else { i64::MIN }),
                    )
                })
                .ok_or_else(|| BfhlError::invalid_input("fibonacci")),
            "prime" => match value {
                Value::Array(items) => Ok(Operation::Prime(
                    items.iter().filter_map(as_integer).collect(),
                )),
                _ => Err(BfhlError::invalid_input("prime")),
            },
            "lcm" => integer_list(value, "lcm").map(Operation::Lcm),
            "hcf" => integer_list(value, "hcf").map(Operation::Hcf),
            "AI" => match value {
                Value::String(prompt) => Ok(Operation::Ai(prompt)),
                _ => Err(BfhlError::invalid_input("AI")),
            },
            _ => Err(BfhlError::UnknownOperation),
        }
    }

    /// The request key that selected this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Fibonacci(_) => "fibonacci",
            Operation::Prime(_) => "prime",
            Operation::Lcm(_) => "lcm",
            Operation::Hcf(_) => "hcf",
            Operation::Ai(_) => "AI",
        }
    }
}

/// Largest float magnitude below which every integral `f64` is exact (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// A JSON number with no fractional part.
///
/// Integer literals are read exactly across the `i64` and `u64` ranges.
/// `5` and `5.0` are both integers; `5.5`, `"5"` and `null` are not. Float
/// literals only count up to 2^53, where they stop being exact.
pub fn as_integer(value: &Value) -> Option<i128> {
    if let Some(n) = value.as_i64() {
        return Some(n.into());
    }
    if let Some(n) = value.as_u64() {
        return Some(n.into());
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT {
        Some(f as i128)
    } else {
        None
    }
}

fn integer_list(value: Value, key: &str) -> Result<Vec<i128>, BfhlError> {
    let Value::Array(items) = value else {
        return Err(BfhlError::invalid_input(key));
    };
    if items.is_empty() {
        return Err(BfhlError::invalid_input(key));
    }
    items
        .iter()
        .map(|item| as_integer(item).ok_or_else(|| BfhlError::invalid_input(key)))
        .collect()
}
