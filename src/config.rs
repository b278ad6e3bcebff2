//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.penwright/config.toml` (user)
//! 3. `/etc/penwright/config.toml` (system)
//! 4. built-in defaults
//!
//! Every field has a default, so a partial file is fine.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::{CacheConfig, DEFAULT_MAX_ENTRIES};
use crate::gateway::{GatewayConfig, GenerationParams};
use crate::voice::CaptureConfig;
use crate::{PenwrightError, Result};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Model artifact and runtime settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    /// Model artifact on disk.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Name the runtime serves the model under (default: artifact file stem).
    #[serde(default)]
    pub name: Option<String>,
    /// Ollama base URL (default: http://localhost:11434).
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Maximum generated tokens (default: 256).
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    /// Sampling temperature (default: 0.01).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Runtime HTTP timeout in seconds (default: 600).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            name: None,
            ollama_url: default_ollama_url(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("llama-2-7b-chat.ggmlv3.q8_0.bin")
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_max_new_tokens() -> u32 {
    GenerationParams::default().max_new_tokens
}

fn default_temperature() -> f32 {
    GenerationParams::default().temperature
}

fn default_timeout() -> u64 {
    600
}

/// Result cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheSection {
    /// Maximum cached results; 0 disables caching (default: 100).
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

/// Voice capture settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceConfig {
    /// Countdown before recording (default: 3).
    #[serde(default = "default_countdown")]
    pub countdown_secs: u32,
    /// Recording length (default: 5).
    #[serde(default = "default_duration")]
    pub duration_secs: u64,
    /// Speech-to-text endpoint. Voice input is disabled without one.
    #[serde(default)]
    pub transcriber_url: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown(),
            duration_secs: default_duration(),
            transcriber_url: None,
        }
    }
}

fn default_countdown() -> u32 {
    3
}

fn default_duration() -> u64 {
    5
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Falls back to defaults when no file exists, but an explicit path that
    /// does not exist is an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a single config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PenwrightError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            PenwrightError::Configuration(msg) => {
                PenwrightError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            PenwrightError::Configuration(format!("Failed to parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(PenwrightError::Configuration(format!(
                "model.temperature must be within 0.0..=2.0, got {}",
                self.model.temperature
            )));
        }
        if self.model.max_new_tokens == 0 {
            return Err(PenwrightError::Configuration(
                "model.max_new_tokens must be positive".to_string(),
            ));
        }
        if self.voice.duration_secs == 0 {
            return Err(PenwrightError::Configuration(
                "voice.duration_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(PenwrightError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".penwright").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/penwright/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Gateway settings derived from `[model]`.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(&self.model.path).params(
            GenerationParams::new()
                .max_new_tokens(self.model.max_new_tokens)
                .temperature(self.model.temperature),
        )
    }

    /// Cache settings derived from `[cache]`.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new().max_entries(self.cache.max_entries)
    }

    /// Capture timing derived from `[voice]`.
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::new()
            .countdown_secs(self.voice.countdown_secs)
            .duration(Duration::from_secs(self.voice.duration_secs))
    }
}
