pub mod tts;

pub use tts::{ElevenLabsTTS, TTSError, TTSResult, VoiceConfig, VoiceSettings};
