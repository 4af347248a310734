//! Google Gemini API client implementation.
//!
//! Single-shot (non-streaming) calls to the `generateContent` endpoint.
//! See: https://ai.google.dev/api/generate-content

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{GenerateRequest, LlmConfig, LlmProvider, Provider, ProviderError, ProviderResult};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Response body. Every field may be missing when the prompt was blocked.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    status: String,
    message: String,
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<LlmConfig>,
}

impl GeminiProvider {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<Option<String>> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(
                "set GEMINI_API_KEY or llm.api_key in the config file".to_string(),
            ));
        }

        let body = build_request(&self.config, request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            // Try to parse as Gemini error format
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(err) => format!("{} - {}", err.error.status, err.error.message),
                Err(_) => body,
            };
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        let text = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(response_text(&parsed))
    }
}

fn build_request(config: &LlmConfig, request: GenerateRequest) -> GeminiRequest {
    let generation_config = if config.temperature.is_some() || config.max_tokens.is_some() {
        Some(GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_tokens,
        })
    } else {
        None
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.query),
            }],
        }],
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(request.system_instruction),
            }],
        },
        generation_config,
    }
}

/// Concatenate the text parts of the first candidate.
///
/// Returns `None` when there is no candidate or none of its parts carry text.
fn response_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
