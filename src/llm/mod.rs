//! LLM client module for the generation service.
//!
//! This module provides a unified interface over the text-generation backends
//! the assistant can talk to:
//! - Google Gemini (`generateContent`)
//! - Ollama (local models)

mod gemini;
mod ollama;
mod provider;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use provider::{LlmProvider, ProviderError, ProviderResult};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Ollama,
}

impl Provider {
    /// Get the display name for this provider.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Ollama => "Ollama (Local)",
        }
    }

    /// Get the default API base URL for this provider.
    pub fn default_api_base(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::Ollama => "http://localhost:11434/api",
        }
    }

    /// Get the default model for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-3-flash-preview",
            Provider::Ollama => "llama3.2",
        }
    }

    /// Environment variables checked for the API key, in priority order.
    pub fn env_var_names(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            Provider::Ollama => &[],
        }
    }

    /// Check if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        match self {
            Provider::Gemini => true,
            Provider::Ollama => false,
        }
    }

    /// Parse a provider name as used in config files and `P2P_PROVIDER`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(Provider::Gemini),
            "ollama" => Some(Provider::Ollama),
            _ => None,
        }
    }
}

/// One single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// The user's raw text.
    pub query: String,
    /// Role description and grounding context.
    pub system_instruction: String,
}

impl GenerateRequest {
    pub fn new(query: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            system_instruction: system_instruction.into(),
        }
    }
}

/// LLM client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            api_base: provider.default_api_base().to_string(),
            api_key: String::new(),
            model: provider.default_model().to_string(),
            temperature: Some(0.7),
            max_tokens: Some(1024),
        }
    }
}

impl LlmConfig {
    /// Check if the client is configured with an API key (or doesn't need one).
    pub fn is_configured(&self) -> bool {
        !self.provider.requires_api_key() || !self.api_key.is_empty()
    }

    /// Load from environment variables, with file config as fallback.
    pub fn from_env_and_config(file_config: Option<&crate::config::LlmConfigFile>) -> Self {
        Self::from_lookup(file_config, |key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env_and_config`], reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup<F>(file_config: Option<&crate::config::LlmConfigFile>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // First apply file config if present
        if let Some(fc) = file_config {
            config.provider = fc.provider;
            config.api_base = fc
                .api_base
                .clone()
                .unwrap_or_else(|| fc.provider.default_api_base().to_string());
            if let Some(ref key) = fc.api_key {
                config.api_key = key.clone();
            }
            config.model = fc
                .model
                .clone()
                .unwrap_or_else(|| fc.provider.default_model().to_string());
            config.temperature = fc.temperature;
            config.max_tokens = fc.max_tokens;
        }

        // Environment variables override file config
        if let Some(provider) = lookup("P2P_PROVIDER").as_deref().and_then(Provider::from_name) {
            if provider != config.provider {
                config.provider = provider;
                config.api_base = provider.default_api_base().to_string();
                config.model = provider.default_model().to_string();
            }
        }

        if let Some(key) = config
            .provider
            .env_var_names()
            .iter()
            .find_map(|name| lookup(*name).filter(|v| !v.is_empty()))
        {
            config.api_key = key;
        }

        if let Some(base) = lookup("P2P_API_BASE") {
            config.api_base = base;
        }

        if config.provider == Provider::Gemini {
            if let Some(model) = lookup("GEMINI_MODEL") {
                config.model = model;
            }
        }

        config
    }
}

/// LLM client for making API calls.
///
/// Wraps a provider implementing `LlmProvider` behind an `Arc` so it can be
/// cloned into spawned request tasks.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn LlmProvider>,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let provider: Arc<dyn LlmProvider> = match config.provider {
            Provider::Gemini => Arc::new(GeminiProvider::new(config)),
            Provider::Ollama => Arc::new(OllamaProvider::new(config)),
        };

        Self { inner: provider }
    }

    /// Create a new LLM client from an existing provider.
    pub fn from_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self { inner: provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &dyn LlmProvider {
        self.inner.as_ref()
    }

    /// Get the provider type.
    pub fn provider_type(&self) -> Provider {
        self.inner.provider()
    }

    /// Check if the client is configured.
    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Get the display name for this provider.
    pub fn display_name(&self) -> &str {
        self.inner.display_name()
    }
}
