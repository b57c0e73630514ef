mod factory;
mod google;
mod open_ai;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to a generative-language backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request never produced a response (connection, TLS, timeout, body decoding)
    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the credential
    #[error("Backend rejected the API key ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The backend refused to answer the prompt
    #[error("Backend blocked the prompt: {0}")]
    Blocked(String),

    /// The response did not contain the expected text
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the model's text reply.
    ///
    /// Makes exactly one request; no retries.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Read a JSON body, turning non-success statuses into typed errors.
pub(crate) async fn read_json(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
    debug!("Backend responded {}: {:?}", status, body);

    if status.is_success() {
        if body.is_null() {
            return Err(ProviderError::MalformedResponse(
                "response body is not JSON".to_string(),
            ));
        }
        return Ok(body);
    }

    let message = body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .map(str::to_string)
        .unwrap_or(text);

    // Gemini reports an invalid key as 400 with status UNAUTHENTICATED or API_KEY_INVALID
    let auth_status = matches!(
        body["error"]["status"].as_str(),
        Some("UNAUTHENTICATED" | "PERMISSION_DENIED")
    ) || body["error"]["details"][0]["reason"].as_str() == Some("API_KEY_INVALID");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Auth {
            status: status.as_u16(),
            message,
        }),
        _ if auth_status => Err(ProviderError::Auth {
            status: status.as_u16(),
            message,
        }),
        _ => Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}
