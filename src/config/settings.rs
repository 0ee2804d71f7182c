//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the summary-generation downstream (chat completions API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the API endpoint.
    ///
    /// - OpenAI: `https://api.openai.com`
    /// - Any OpenAI-compatible provider works (Groq, vLLM, LM Studio …).
    pub base_url: String,
    /// API key — `None` for local providers that require no authentication.
    ///
    /// The `OPENAI_API_KEY` environment variable, when set, takes precedence
    /// over this field (see [`LlmConfig::resolved_api_key`]).
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"gpt-4"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for a completion before timing out.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-4".into(),
            temperature: 0.3,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// The API key to use for this session: the `OPENAI_API_KEY` environment
    /// variable when present and non-empty, otherwise the configured value.
    pub fn resolved_api_key(&self) -> Option<String> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(key),
            _ => self.api_key.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

/// Settings for the external paper backend (storage + similarity search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the paper-processing function.
    pub base_url: String,
    /// Maximum seconds to wait for a backend response.
    pub timeout_secs: u64,
    /// Number of records returned by the recent-papers listing.
    pub recent_limit: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".into(),
            timeout_secs: 30,
            recent_limit: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the external text-to-speech synthesis function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the speech-synthesis function.
    pub base_url: String,
    /// API key — `None` when the function requires no authentication.
    pub api_key: Option<String>,
    /// Voice selected on startup.  Must be one of the fixed voice catalog
    /// ids (see `speech::VOICES`).
    pub default_voice: String,
    /// Maximum seconds to wait for synthesized audio.
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".into(),
            api_key: None,
            default_voice: "EXAVITQu4vr4xnSDxMaL".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Settings for the local HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (e.g. `"127.0.0.1"`).
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8780,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use paper_assistant::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Summary-generation downstream settings.
    pub llm: LlmConfig,
    /// Paper backend settings.
    pub backend: BackendConfig,
    /// Speech-synthesis settings.
    pub speech: SpeechConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
