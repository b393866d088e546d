//! HTTP client for the external language-generation provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// HTTP request timeout for a single generation attempt. The assistant
/// must never block the booking flow, so this is deliberately short.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default model when `GENERATION_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for generation failures. The service layer converts every
/// variant into a fallback string; callers never see these.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Generation provider returned HTTP {0}")]
    HttpStatus(u16),

    /// The provider answered 2xx but the body had no usable completion.
    #[error("Malformed generation response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Configuration for the generation provider.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub api_url: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `GENERATION_API_URL` is not set, signalling that
    /// the assistant should run fallback-only.
    ///
    /// | Variable             | Required | Default       |
    /// |----------------------|----------|---------------|
    /// | `GENERATION_API_URL` | yes      | —             |
    /// | `GENERATION_API_KEY` | no       | —             |
    /// | `GENERATION_MODEL`   | no       | `gpt-4o-mini` |
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("GENERATION_API_URL").ok()?;
        Some(Self {
            api_url,
            api_key: std::env::var("GENERATION_API_KEY").ok(),
            model: std::env::var("GENERATION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// GenerationClient
// ---------------------------------------------------------------------------

/// The seam between the assistant service and the provider.
///
/// Production uses [`HttpGenerationClient`]; tests substitute failing,
/// slow, or canned implementations.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce a completion for the given system/user prompt pair,
    /// bounded by `max_tokens`.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// HttpGenerationClient
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Calls an OpenAI-compatible chat-completions endpoint.
pub struct HttpGenerationClient {
    config: GenerationConfig,
    client: reqwest::Client,
}

impl HttpGenerationClient {
    /// Create a client with a pre-configured HTTP transport.
    pub fn new(config: GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let payload = ChatRequest {
            model: &self.config.model,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));
        let mut request = self.client.post(&url).json(&payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status().as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::Malformed("empty choices array".to_string()))
    }
}
