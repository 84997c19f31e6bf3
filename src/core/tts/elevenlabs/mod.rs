//! ElevenLabs TTS provider module.
//!
//! This module provides text-to-speech synthesis using ElevenLabs' REST API.
//! Each call renders one piece of text into a complete MP3 payload.
//!
//! # Example
//!
//! ```rust,no_run
//! use voicegen::config::{ApiKey, GeneratorConfig};
//! use voicegen::core::tts::ElevenLabsTTS;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::new(ApiKey::new("your-api-key"));
//! let tts = ElevenLabsTTS::new(&config)?;
//! let audio = tts.synthesize("Good!").await?;
//! println!("Received {} bytes", audio.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod provider;

pub use config::{DEFAULT_MODEL_ID, DEFAULT_VOICE_ID, VoiceConfig, VoiceSettings};
pub use provider::{
    API_KEY_HEADER, AUDIO_FILE_EXTENSION, AUDIO_MIME_TYPE, ELEVENLABS_API_URL, ElevenLabsTTS,
};
