use thiserror::Error;

/// Failures a `/bfhl` caller can see. All of them map to HTTP 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BfhlError {
    #[error("Request must contain exactly one key")]
    InvalidShape,

    #[error("Invalid key")]
    UnknownOperation,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    MalformedBody(String),
}

impl BfhlError {
    /// `InvalidInput` with the conventional "Invalid <key> input" message.
    pub fn invalid_input(key: &str) -> Self {
        BfhlError::InvalidInput(format!("Invalid {} input", key))
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BfhlError::InvalidShape => "invalid_shape",
            BfhlError::UnknownOperation => "unknown_operation",
            BfhlError::InvalidInput(_) => "invalid_input",
            BfhlError::MalformedBody(_) => "malformed_body",
        }
    }
}
