//! LLM Provider trait for the generation service seam.
//!
//! This module defines the `LlmProvider` trait that every text-generation
//! backend implements, plus the error type they report through.

use async_trait::async_trait;

use super::{GenerateRequest, Provider};

/// Trait for text-generation providers.
///
/// A provider takes a single query plus a system instruction and returns the
/// generated text, or `None` when the service answered without any text.
///
/// # Example
///
/// ```ignore
/// use p2p_assist::llm::{GenerateRequest, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) {
///     let request = GenerateRequest::new("How much is 3kg from London?", "Be brief.");
///     match provider.generate(request).await {
///         Ok(Some(text)) => println!("{}", text),
///         Ok(None) => println!("(no answer)"),
///         Err(e) => eprintln!("{}", e),
///     }
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider type.
    fn provider(&self) -> Provider;

    /// Returns the current model name.
    fn model(&self) -> &str;

    /// Returns whether the provider has what it needs to make a call.
    ///
    /// For API-key based providers, this checks if the key is set.
    /// Local providers always report true.
    fn is_configured(&self) -> bool;

    /// Returns the display name for this provider instance.
    fn display_name(&self) -> &str {
        self.provider().display_name()
    }

    /// Issue one generation request and wait for the full reply.
    async fn generate(&self, request: GenerateRequest) -> ProviderResult<Option<String>>;
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider is not configured (missing API key, etc.)
    NotConfigured(String),

    /// Authentication failed
    AuthenticationFailed(String),

    /// Rate limit exceeded
    RateLimited(String),

    /// Network or connection error
    NetworkError(String),

    /// API returned an error
    ApiError { status: u16, message: String },

    /// The response body could not be understood
    InvalidResponse(String),

    /// Provider-specific error
    Other(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and body to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited(message),
            _ => Self::ApiError { status, message },
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured(msg) => write!(f, "Provider not configured: {}", msg),
            Self::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            Self::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::ApiError { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NetworkError("Request timed out".to_string())
        } else if err.is_connect() {
            Self::NetworkError(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}
