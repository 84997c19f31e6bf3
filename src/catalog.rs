//! Voice clip catalog.
//!
//! The catalog is an ordered list of `(identifier, text)` pairs compiled into
//! the binary. Identifiers double as output filename stems, so they are kept
//! to lowercase ASCII letters, digits and underscores. Iteration order is the
//! generation order.

use thiserror::Error;

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    /// Identifier, used as the output filename stem
    pub id: &'static str,
    /// Text spoken in the clip
    pub text: &'static str,
}

impl Clip {
    pub const fn new(id: &'static str, text: &'static str) -> Self {
        Self { id, text }
    }
}

// =============================================================================
// Built-in Clips
// =============================================================================

/// Clips used by the app's voice guidance.
pub static VOICE_CLIPS: &[Clip] = &[
    // Breathing exercise
    Clip::new(
        "breathing_intro",
        "Starting 4-7-8 Breathing. A calming breath pattern.",
    ),
    Clip::new("inhale", "In"),
    Clip::new("hold", "Hold"),
    Clip::new("exhale", "Out"),
    Clip::new(
        "breathing_complete",
        "Breathing exercise complete. Well done.",
    ),
    // Workout
    Clip::new("workout_intro", "Starting Daily Vocal Workout."),
    Clip::new("warmup_scale", "Warm-up Scale"),
    Clip::new("descending_scale", "Descending Scale"),
    Clip::new("major_arpeggio", "Major Arpeggio"),
    Clip::new("octave_jump", "Octave Jump"),
    Clip::new("siren", "Siren"),
    Clip::new("extended_range", "Extended Range"),
    Clip::new("next_exercise", "Next exercise"),
    Clip::new("workout_complete", "Workout complete. Great job!"),
    // Feedback
    Clip::new("good", "Good!"),
    Clip::new("try_match_pitch", "Try to match the pitch"),
];

// =============================================================================
// Catalog
// =============================================================================

/// Errors raised when selecting clips from a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown clip id(s): {}. Run `voicegen list` to see available clips", .0.join(", "))]
    UnknownClips(Vec<String>),
}

/// An ordered, immutable set of clips to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    clips: Vec<Clip>,
}

impl Catalog {
    /// Build a catalog from an explicit list of clips.
    pub fn new(clips: impl Into<Vec<Clip>>) -> Self {
        Self {
            clips: clips.into(),
        }
    }

    /// The full built-in catalog.
    pub fn builtin() -> Self {
        Self::new(VOICE_CLIPS)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    /// Look up a clip by identifier.
    pub fn get(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    /// Restrict the catalog to the given identifiers.
    ///
    /// The result keeps catalog order regardless of the order of `ids`, and
    /// duplicates collapse. Any identifier not present in the catalog is an
    /// error, and nothing is selected in that case.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Self, CatalogError> {
        let unknown: Vec<String> = ids
            .iter()
            .map(|id| id.as_ref().trim())
            .filter(|id| self.get(id).is_none())
            .map(str::to_string)
            .collect();

        if !unknown.is_empty() {
            return Err(CatalogError::UnknownClips(unknown));
        }

        let clips = self
            .clips
            .iter()
            .filter(|clip| ids.iter().any(|id| id.as_ref().trim() == clip.id))
            .copied()
            .collect::<Vec<_>>();

        Ok(Self::new(clips))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Clip;
    type IntoIter = std::slice::Iter<'a, Clip>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}
