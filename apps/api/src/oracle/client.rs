//! OpenAI-compatible chat-completion client (Groq by default).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Completion, Oracle, OracleError};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completion client used in production.
/// Retries on 429 (rate limit) and 5xx errors with exponential backoff: one initial attempt
/// plus up to `max_retries` more.
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_retries: u32,
}

impl ChatCompletionClient {
    pub fn from_config(config: &Config) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.oracle_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.oracle_api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.oracle_base_url.trim_end_matches('/')
            ),
            model: config.oracle_model.clone(),
            max_retries: config.oracle_max_retries,
        })
    }
}

#[async_trait]
impl Oracle for ChatCompletionClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: Completion<'_>) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut last_error: Option<OracleError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Oracle call attempt {} of {} failed, retrying after {}ms...",
                    attempt,
                    self.max_retries + 1,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(OracleError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("Oracle API returned {}: {}", status, text);
                last_error = Some(OracleError::Api {
                    status: status.as_u16(),
                    message: text,
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(OracleError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "Oracle call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return chat
                .text()
                .map(String::from)
                .ok_or(OracleError::EmptyContent);
        }

        Err(last_error.unwrap_or(OracleError::RateLimited {
            retries: self.max_retries,
        }))
    }
}
