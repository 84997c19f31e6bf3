//! Voice configuration types for the ElevenLabs TTS API.
//!
//! - Voice selection (voice id, defaults to "Rachel")
//! - Model selection (defaults to `eleven_turbo_v2_5`)
//! - Voice settings (stability, similarity boost, style, speaker boost)

use serde::{Deserialize, Serialize};

/// Default voice: "Rachel", a calm female voice suited to guidance prompts
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Default model, available on the free tier
pub const DEFAULT_MODEL_ID: &str = "eleven_turbo_v2_5";

const DEFAULT_STABILITY: f32 = 0.6;
const DEFAULT_SIMILARITY_BOOST: f32 = 0.8;
const DEFAULT_STYLE: f32 = 0.3;

// =============================================================================
// Voice Settings
// =============================================================================

/// Voice rendering parameters sent with every request.
///
/// - **Stability** (0.0-1.0): Lower values = more expressive
/// - **Similarity Boost** (0.0-1.0): Higher values = closer to the original voice
/// - **Style** (0.0-1.0): Style exaggeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            // Slightly varied for a natural feel
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
            // Calm, relaxed style
            style: DEFAULT_STYLE,
            use_speaker_boost: true,
        }
    }
}

impl VoiceSettings {
    /// Returns the name of the first setting outside `[0.0, 1.0]`, if any.
    pub fn out_of_range(&self) -> Option<(&'static str, f32)> {
        [
            ("stability", self.stability),
            ("similarity_boost", self.similarity_boost),
            ("style", self.style),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}

// =============================================================================
// Voice Configuration
// =============================================================================

/// Voice and model used for every clip in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub voice_id: String,
    pub model_id: String,
    pub settings: VoiceSettings,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            settings: VoiceSettings::default(),
        }
    }
}

// =============================================================================
// Request Body
// =============================================================================

/// JSON body of a text-to-speech request.
#[derive(Debug, Serialize)]
pub(crate) struct SpeechRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

impl<'a> SpeechRequest<'a> {
    pub fn new(text: &'a str, voice: &'a VoiceConfig) -> Self {
        Self {
            text,
            model_id: &voice.model_id,
            voice_settings: voice.settings,
        }
    }
}
