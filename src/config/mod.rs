//! Configuration module for voicegen
//!
//! This module builds the run configuration from environment variables (a
//! `.env` file is loaded into the environment by `main`) and an optional YAML
//! file. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Example
//! ```rust,no_run
//! use voicegen::config::GeneratorConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = GeneratorConfig::from_env()?;
//!
//! // Load from YAML file with environment variables as the base
//! let config = GeneratorConfig::from_file(Path::new("voicegen.yaml"))?;
//!
//! println!("Writing clips to {}", config.output_dir.display());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::tts::elevenlabs::{DEFAULT_MODEL_ID, DEFAULT_VOICE_ID};
use crate::core::tts::{ELEVENLABS_API_URL, VoiceConfig, VoiceSettings};
use crate::utils::url_validation::{UrlValidationError, validate_api_base_url};

mod yaml;

pub use yaml::{ApiYaml, OutputYaml, VoiceYaml, YamlConfig};

/// Environment variable holding the ElevenLabs API key
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
pub const BASE_URL_ENV: &str = "ELEVENLABS_BASE_URL";
pub const VOICE_ID_ENV: &str = "ELEVENLABS_VOICE_ID";
pub const MODEL_ID_ENV: &str = "ELEVENLABS_MODEL_ID";
pub const OUTPUT_DIR_ENV: &str = "VOICEGEN_OUTPUT_DIR";
pub const REQUEST_TIMEOUT_ENV: &str = "VOICEGEN_REQUEST_TIMEOUT_SECONDS";

/// Output directory, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "assets/audio/voice";

/// Pause between consecutive requests to stay under the provider's rate limit
pub const REQUEST_DELAY: Duration = Duration::from_millis(500);

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ELEVENLABS_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] UrlValidationError),

    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =============================================================================
// Credential
// =============================================================================

/// ElevenLabs API key.
///
/// The key is redacted from `Debug` output and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key, for use in request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

// =============================================================================
// Generator Configuration
// =============================================================================

/// Configuration for a generation run.
///
/// Built once at startup and passed by reference to the generator; nothing in
/// it changes during a run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: ApiKey,
    /// API base URL, without trailing slash
    pub base_url: String,
    pub voice: VoiceConfig,
    /// Directory clips are written to, created if missing
    pub output_dir: PathBuf,
    /// Pause after every request, whatever its outcome
    pub request_delay: Duration,
    /// Upper bound on a single request, including reading the body
    pub request_timeout: Duration,
}

impl GeneratorConfig {
    /// Configuration with default settings for the given key
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: ELEVENLABS_API_URL.to_string(),
            voice: VoiceConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_delay: REQUEST_DELAY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingApiKey`] if `ELEVENLABS_API_KEY` is unset
    /// or blank, or another variant if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(None)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables provide base values; every value present in the
    /// YAML file overrides them. Validation runs on the merged result.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = YamlConfig::from_file(path)?;
        Self::from_sources(Some(yaml))
    }

    fn from_sources(yaml: Option<YamlConfig>) -> Result<Self, ConfigError> {
        let yaml = yaml.unwrap_or_default();
        let api = yaml.api.unwrap_or_default();
        let voice = yaml.voice.unwrap_or_default();
        let output = yaml.output.unwrap_or_default();

        let api_key = api
            .api_key
            .or_else(|| env_var(API_KEY_ENV))
            .filter(|key| !key.trim().is_empty())
            .map(|key| ApiKey::new(key.trim()))
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = api
            .base_url
            .or_else(|| env_var(BASE_URL_ENV))
            .unwrap_or_else(|| ELEVENLABS_API_URL.to_string());

        let request_timeout_seconds = match api.request_timeout_seconds {
            Some(seconds) => seconds,
            None => match env_var(REQUEST_TIMEOUT_ENV) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                    field: REQUEST_TIMEOUT_ENV,
                    reason: format!("{raw:?} is not a whole number of seconds ({e})"),
                })?,
                None => DEFAULT_REQUEST_TIMEOUT_SECONDS,
            },
        };

        let defaults = VoiceConfig::default();
        let voice = VoiceConfig {
            voice_id: voice
                .voice_id
                .or_else(|| env_var(VOICE_ID_ENV))
                .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            model_id: voice
                .model_id
                .or_else(|| env_var(MODEL_ID_ENV))
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            settings: VoiceSettings {
                stability: voice.stability.unwrap_or(defaults.settings.stability),
                similarity_boost: voice
                    .similarity_boost
                    .unwrap_or(defaults.settings.similarity_boost),
                style: voice.style.unwrap_or(defaults.settings.style),
                use_speaker_boost: voice
                    .use_speaker_boost
                    .unwrap_or(defaults.settings.use_speaker_boost),
            },
        };

        let output_dir = output
            .dir
            .or_else(|| env_var(OUTPUT_DIR_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let mut config = Self {
            api_key,
            base_url,
            voice,
            output_dir,
            request_delay: REQUEST_DELAY,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, normalizing the base URL in place
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.base_url = validate_api_base_url(&self.base_url)?;

        let voice_id = self.voice.voice_id.trim();
        if voice_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "voice_id",
                reason: "must not be empty".to_string(),
            });
        }
        if !voice_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(ConfigError::InvalidValue {
                field: "voice_id",
                reason: format!("{voice_id:?} may only contain ASCII letters, digits, '-' and '_'"),
            });
        }
        self.voice.voice_id = voice_id.to_string();

        if self.voice.model_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model_id",
                reason: "must not be empty".to_string(),
            });
        }

        if let Some((field, value)) = self.voice.settings.out_of_range() {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("{value} is outside the range 0.0 to 1.0"),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output_dir",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Resolve only the output directory, without requiring a credential
///
/// Used by `--dry-run`, which never contacts the API. Follows the same
/// priority as [`GeneratorConfig::from_file`].
pub fn resolve_output_dir(config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let yaml_dir = match config_path {
        Some(path) => YamlConfig::from_file(path)?.output.and_then(|output| output.dir),
        None => None,
    };

    Ok(yaml_dir
        .or_else(|| env_var(OUTPUT_DIR_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)))
}

/// Read a non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
