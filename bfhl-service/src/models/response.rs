use serde::Serialize;
use serde_json::Value;

/// Envelope shared by every bfhl endpoint.
///
/// Built only through [`ApiResponse::success`] and [`ApiResponse::failure`],
/// so exactly one of `data` / `error` is ever present.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiResponse {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(official_email: impl Into<String>, data: Value) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    /// Liveness payload: success without a `data` field.
    pub fn healthy(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: None,
            error: None,
        }
    }
}
