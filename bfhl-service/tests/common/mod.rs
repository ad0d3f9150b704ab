#![allow(dead_code)]

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use bfhl_service::config::{BfhlConfig, GeminiSettings, ObservabilitySettings};
use bfhl_service::services::providers::TextProvider;
use bfhl_service::startup::{AppState, Application};
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST_EMAIL: &str = "student@college.edu";
pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(api_base: &str) -> BfhlConfig {
    BfhlConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        official_email: TEST_EMAIL.to_string(),
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: "gemini-1.5-flash".to_string(),
            api_base: api_base.to_string(),
            timeout_secs: 5,
        },
        observability: ObservabilitySettings {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn test_state(provider: Arc<dyn TextProvider>) -> AppState {
    AppState {
        config: Arc::new(test_config("http://127.0.0.1:1/v1")),
        text_provider: provider,
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real application wired to the Gemini client at `api_base`.
    pub async fn spawn(api_base: &str) -> Self {
        let app = Application::build(test_config(api_base))
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    /// Spawn the application around an explicit provider.
    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(test_config("http://127.0.0.1:1/v1"), provider)
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            address,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_bfhl(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/bfhl", self.address))
            .json(&body)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// Stand-in for the Gemini `generateContent` API.
///
/// Replies with `reply` when the expected key header is present, 401 otherwise.
/// Returns the stub's base URL (including `/v1`).
pub async fn spawn_gemini_stub(reply: Value) -> String {
    let router = Router::new().route(
        "/v1/models/:action",
        post(move |Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
            let reply = reply.clone();
            async move {
                let authorized = headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    == Some(TEST_API_KEY);
                let well_formed = action.ends_with(":generateContent")
                    && body["contents"][0]["parts"][0]["text"].is_string();

                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                }
                if !well_formed {
                    return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad request"})));
                }
                (StatusCode::OK, Json(reply))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind Gemini stub");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://127.0.0.1:{}/v1", port)
}

pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}
