/// Oracle Gateway. The single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the chat-completion API directly.
/// Every prompt goes through an `Oracle`, which `AppState` carries as `Arc<dyn Oracle>`.
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod client;
pub mod prompts;

pub use client::ChatCompletionClient;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Oracle returned empty content")]
    EmptyContent,
}

/// One prompt plus its sampling parameters.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    pub prompt: &'a str,
    pub system: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> Completion<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            system: prompts::DEFAULT_SYSTEM,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Text in, text out. Implementations own transport, auth and retries.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Model identifier reported by the health endpoint.
    fn model(&self) -> &str;

    /// Sends one completion request and returns the trimmed text of the reply.
    async fn complete(&self, request: Completion<'_>) -> Result<String, OracleError>;
}

/// Calls the oracle and deserializes the reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    oracle: &dyn Oracle,
    request: Completion<'_>,
) -> Result<T, OracleError> {
    let text = oracle.complete(request).await?;
    parse_json_reply(&text)
}

/// Parses a model reply as JSON after stripping any markdown fences.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, OracleError> {
    serde_json::from_str(strip_json_fences(text)).map_err(OracleError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
