use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::Provider;

/// RGB color represented as a 3-element array.
pub type Rgb = [u8; 3];

/// LLM configuration for API access.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfigFile {
    /// Which generation service to use
    pub provider: Provider,
    /// API base URL (provider default when unset)
    pub api_base: Option<String>,
    /// API key (can also be set via GEMINI_API_KEY env var)
    pub api_key: Option<String>,
    /// Model name (provider default when unset)
    pub model: Option<String>,
    /// Temperature for generation
    pub temperature: Option<f32>,
    /// Max output tokens for generation
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfigFile {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_base: None,
            api_key: None,
            model: None,
            temperature: Some(0.7),
            max_tokens: Some(1024),
        }
    }
}

/// Color configuration for the UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Chat area gradient start color
    pub chat_gradient_start: Rgb,
    /// Chat area gradient end color
    pub chat_gradient_end: Rgb,
    /// Input area gradient start color
    pub input_gradient_start: Rgb,
    /// Input area gradient end color
    pub input_gradient_end: Rgb,
    /// Brand accent used for prices and highlights
    pub brand_primary: Rgb,
    /// Brand navy used for user messages
    pub brand_navy: Rgb,
    /// Status: Ready
    pub status_ready: Rgb,
    /// Status: waiting on a reply
    pub status_pending: Rgb,
    /// Status: Not configured
    pub status_not_configured: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            chat_gradient_start: [230, 57, 70],   // Red
            chat_gradient_end: [29, 53, 87],      // Navy
            input_gradient_start: [69, 123, 157], // Steel blue
            input_gradient_end: [168, 218, 220],  // Powder blue
            brand_primary: [230, 57, 70],
            brand_navy: [120, 160, 230],
            status_ready: [100, 255, 100],
            status_pending: [100, 200, 255],
            status_not_configured: [255, 100, 100],
        }
    }
}

/// Behavior configuration for the UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Number of lines to scroll with Page Up/Down
    pub scroll_page_size: usize,
    /// Event polling interval in milliseconds while idle
    pub idle_poll_ms: u64,
    /// Event polling interval in milliseconds while a reply is pending
    pub busy_poll_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            scroll_page_size: 10,
            idle_poll_ms: 50,
            busy_poll_ms: 16, // ~60 FPS
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether to write a log file at all
    pub enabled: bool,
    /// Default filter when RUST_LOG is not set
    pub level: String,
    /// Directory for the log file (cache dir when unset)
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfigFile,
    pub behavior: BehaviorConfig,
    pub colors: ColorConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns the default config file path: ~/.config/p2p-assist/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("p2p-assist").join("config.toml"))
    }

    /// Load configuration from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_from_path(&path).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl ColorConfig {
    /// Convert an RGB array to a tuple for gradient math.
    pub fn to_tuple(rgb: &Rgb) -> (u8, u8, u8) {
        (rgb[0], rgb[1], rgb[2])
    }

    /// Convert an RGB array to a ratatui Color.
    pub fn to_color(rgb: &Rgb) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Get chat gradient colors as tuples.
    pub fn chat_gradient(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        (
            Self::to_tuple(&self.chat_gradient_start),
            Self::to_tuple(&self.chat_gradient_end),
        )
    }

    /// Get input gradient colors as tuples.
    pub fn input_gradient(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        (
            Self::to_tuple(&self.input_gradient_start),
            Self::to_tuple(&self.input_gradient_end),
        )
    }

    pub fn brand_primary(&self) -> ratatui::style::Color {
        Self::to_color(&self.brand_primary)
    }

    pub fn brand_navy(&self) -> ratatui::style::Color {
        Self::to_color(&self.brand_navy)
    }

    pub fn status_ready(&self) -> ratatui::style::Color {
        Self::to_color(&self.status_ready)
    }

    pub fn status_pending(&self) -> ratatui::style::Color {
        Self::to_color(&self.status_pending)
    }

    pub fn status_not_configured(&self) -> ratatui::style::Color {
        Self::to_color(&self.status_not_configured)
    }
}
