mod base;
pub mod elevenlabs;

pub use base::{TTSError, TTSResult};
pub use elevenlabs::{
    AUDIO_FILE_EXTENSION, AUDIO_MIME_TYPE, ELEVENLABS_API_URL, ElevenLabsTTS, VoiceConfig,
    VoiceSettings,
};
