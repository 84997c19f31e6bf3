use serde::Deserialize;
use std::path::Path;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override the corresponding environment variables.
///
/// # Example YAML structure
/// ```yaml
/// api:
///   api_key: "your-elevenlabs-key"
///   base_url: "https://api.elevenlabs.io/v1"
///   request_timeout_seconds: 60
///
/// voice:
///   voice_id: "21m00Tcm4TlvDq8ikWAM"
///   model_id: "eleven_turbo_v2_5"
///   stability: 0.6
///   similarity_boost: 0.8
///   style: 0.3
///   use_speaker_boost: true
///
/// output:
///   dir: "assets/audio/voice"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct YamlConfig {
    pub api: Option<ApiYaml>,
    pub voice: Option<VoiceYaml>,
    pub output: Option<OutputYaml>,
}

/// API access settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ApiYaml {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

/// Voice settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct VoiceYaml {
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
    pub stability: Option<f32>,
    pub similarity_boost: Option<f32>,
    pub style: Option<f32>,
    pub use_speaker_boost: Option<bool>,
}

/// Output settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct OutputYaml {
    pub dir: Option<String>,
}

impl YamlConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(ConfigError::Yaml)
    }
}
