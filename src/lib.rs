//! Batch generator for voice-guidance audio clips.
//!
//! Renders a fixed catalog of short prompts through the ElevenLabs
//! text-to-speech API and saves each one as `<id>.mp3` in an output
//! directory.

pub mod catalog;
pub mod config;
pub mod core;
pub mod generator;
pub mod runner;
pub mod utils;

// Re-export commonly used items for convenience
pub use catalog::{Catalog, CatalogError, Clip, VOICE_CLIPS};
pub use config::{ApiKey, ConfigError, GeneratorConfig};
pub use crate::core::{ElevenLabsTTS, TTSError, TTSResult, VoiceConfig, VoiceSettings};
pub use generator::{ClipGenerator, ClipOutcome};
pub use runner::{ClipReport, RunError, RunSummary, run};
