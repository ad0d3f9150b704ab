//! Runs a decoded [`Operation`] and produces the `data` payload.

use crate::error::BfhlError;
use crate::models::Operation;
use crate::services::math;
use crate::services::providers::{answer_or_fallback, TextProvider};
use serde_json::{json, Value};
use std::fmt::Display;

/// Execute one operation.
///
/// Only numeric range failures surface as errors; the `AI` branch always
/// succeeds because provider failures are absorbed by the fallback policy.
pub async fn execute(
    operation: Operation,
    provider: &dyn TextProvider,
) -> Result<Value, BfhlError> {
    match operation {
        Operation::Fibonacci(n) => math::fibonacci(n)
            .map(|series| Value::Array(series.iter().map(exact_number).collect()))
            .ok_or_else(|| {
                BfhlError::InvalidInput(format!(
                    "fibonacci input exceeds the {} term limit",
                    math::MAX_FIBONACCI_TERMS
                ))
            }),
        Operation::Prime(values) => {
            let primes = tokio::task::spawn_blocking(move || math::filter_primes(&values))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Prime filter task failed");
                    BfhlError::invalid_input("prime")
                })?;
            Ok(json!(primes))
        }
        Operation::Lcm(values) => math::lcm_of(&values)
            .map(exact_number)
            .ok_or_else(|| BfhlError::InvalidInput("lcm result out of range".to_string())),
        Operation::Hcf(values) => math::hcf_of(&values)
            .map(exact_number)
            .ok_or_else(|| BfhlError::invalid_input("hcf")),
        Operation::Ai(prompt) => Ok(json!(answer_or_fallback(provider, &prompt).await)),
    }
}

/// A JSON number carrying every digit of `n`, however large.
fn exact_number(n: impl Display) -> Value {
    serde_json::from_str(&n.to_string()).unwrap_or(Value::Null)
}
