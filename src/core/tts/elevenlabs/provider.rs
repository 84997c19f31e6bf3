//! ElevenLabs TTS client.
//!
//! # API Reference
//!
//! - Endpoint: `POST {base_url}/text-to-speech/{voice_id}`
//! - Auth: `xi-api-key` header
//! - Request: JSON `{ text, model_id, voice_settings }`
//! - Response: `200 OK` with an `audio/mpeg` body; anything else carries a
//!   provider-defined diagnostic body

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use super::config::{SpeechRequest, VoiceConfig};
use crate::config::{ApiKey, GeneratorConfig};
use crate::core::tts::base::{TTSError, TTSResult};

/// ElevenLabs REST API base URL
pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "xi-api-key";

/// MIME type requested for generated audio
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// File extension matching [`AUDIO_MIME_TYPE`]
pub const AUDIO_FILE_EXTENSION: &str = "mp3";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the ElevenLabs text-to-speech endpoint.
///
/// One instance is built per run; the inner `reqwest::Client` pools
/// connections across clips.
pub struct ElevenLabsTTS {
    client: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    voice: VoiceConfig,
}

impl ElevenLabsTTS {
    /// Create a client from the run configuration
    pub fn new(config: &GeneratorConfig) -> TTSResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                TTSError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: &GeneratorConfig) -> Self {
        let endpoint = format!(
            "{}/text-to-speech/{}",
            config.base_url.trim_end_matches('/'),
            config.voice.voice_id
        );

        Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            voice: config.voice.clone(),
        }
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn voice(&self) -> &VoiceConfig {
        &self.voice
    }

    /// Build the HTTP request for one piece of text
    pub fn build_http_request(&self, text: &str) -> reqwest::RequestBuilder {
        self.client
            .post(&self.endpoint)
            .header(ACCEPT, AUDIO_MIME_TYPE)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&SpeechRequest::new(text, &self.voice))
    }

    /// Synthesize `text` and return the complete audio payload.
    ///
    /// Only `200 OK` counts as success. The body is fully buffered before
    /// returning, so callers never observe a partial payload.
    pub async fn synthesize(&self, text: &str) -> TTSResult<Bytes> {
        debug!(endpoint = %self.endpoint, chars = text.len(), "Sending TTS request");

        let response = self.build_http_request(text).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = match response.bytes().await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => format!("<failed to read error body: {e}>"),
            };
            return Err(TTSError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        debug!(bytes = audio.len(), "Received TTS audio");
        Ok(audio)
    }
}
