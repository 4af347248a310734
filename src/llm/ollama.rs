//! Ollama provider for local models.
//!
//! Useful for trying the assistant without a Gemini key. Ollama runs locally
//! and needs no authentication.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{GenerateRequest, LlmConfig, LlmProvider, Provider, ProviderError, ProviderResult};

/// Default Ollama API base URL.
const DEFAULT_API_BASE: &str = "http://localhost:11434/api";

/// Ollama provider for local models.
pub struct OllamaProvider {
    client: Client,
    config: Arc<LlmConfig>,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Get the API base URL.
    fn api_base(&self) -> &str {
        if self.config.api_base.is_empty() {
            DEFAULT_API_BASE
        } else {
            &self.config.api_base
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider(&self) -> Provider {
        Provider::Ollama
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<Option<String>> {
        let url = format!("{}/chat", self.api_base().trim_end_matches('/'));
        let body = build_request(&self.config, request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::NetworkError(
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve"
                            .to_string(),
                    )
                } else {
                    ProviderError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let text = response.text().await?;
        let parsed: OllamaChatResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::Other(error));
        }

        Ok(parsed
            .message
            .map(|m| m.content)
            .filter(|content| !content.is_empty()))
    }
}

fn build_request(config: &LlmConfig, request: GenerateRequest) -> OllamaChatRequest {
    let options = if config.temperature.is_some() || config.max_tokens.is_some() {
        Some(OllamaOptions {
            temperature: config.temperature,
            num_predict: config.max_tokens,
        })
    } else {
        None
    };

    OllamaChatRequest {
        model: config.model.clone(),
        messages: vec![
            OllamaMessage {
                role: "system".to_string(),
                content: request.system_instruction,
            },
            OllamaMessage {
                role: "user".to_string(),
                content: request.query,
            },
        ],
        stream: false,
        options,
    }
}

/// Ollama chat request format.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

/// Ollama message format.
#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

/// Ollama options for generation.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Non-streaming chat response.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<OllamaResponseMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}
