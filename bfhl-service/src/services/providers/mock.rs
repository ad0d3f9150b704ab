//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

/// Mock text provider for testing.
///
/// Enabled mocks echo the prompt unless a canned reply was set; disabled
/// mocks fail every call.
pub struct MockTextProvider {
    enabled: bool,
    reply: Option<String>,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            reply: None,
        }
    }

    /// Enabled mock that always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            enabled: true,
            reply: Some(reply.into()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| format!("Mock response for: {}", prompt)))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }
}
