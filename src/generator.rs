//! Clip generation.
//!
//! [`ClipGenerator::generate`] turns one catalog entry into one
//! [`ClipOutcome`]. It never returns an error: request failures, rejected
//! requests and filesystem errors all become outcome variants, and the caller
//! moves on to the next clip.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::Clip;
use crate::config::GeneratorConfig;
use crate::core::tts::{AUDIO_FILE_EXTENSION, ElevenLabsTTS, TTSError, TTSResult};

/// Result of generating a single clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The audio was written to `path`
    Written { path: PathBuf, bytes: usize },
    /// The provider answered with a non-200 status
    Rejected { status: u16, body: String },
    /// No complete response was received
    TransportFailed { message: String },
    /// The response arrived but could not be saved
    WriteFailed { path: PathBuf, message: String },
}

impl ClipOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClipOutcome::Written { .. })
    }
}

impl From<TTSError> for ClipOutcome {
    fn from(err: TTSError) -> Self {
        match err {
            TTSError::ProviderError { status, body } => ClipOutcome::Rejected { status, body },
            other => ClipOutcome::TransportFailed {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for ClipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipOutcome::Written { path, bytes } => {
                write!(f, "wrote {bytes} bytes to {}", path.display())
            }
            ClipOutcome::Rejected { status, body } => write!(f, "{status} - {body}"),
            ClipOutcome::TransportFailed { message } => f.write_str(message),
            ClipOutcome::WriteFailed { path, message } => {
                write!(f, "failed to write {}: {message}", path.display())
            }
        }
    }
}

/// Path a clip is written to inside `output_dir`
pub fn clip_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{id}.{AUDIO_FILE_EXTENSION}"))
}

/// Renders clips through the TTS client and saves them to disk.
pub struct ClipGenerator {
    tts: ElevenLabsTTS,
    output_dir: PathBuf,
}

impl ClipGenerator {
    pub fn new(config: &GeneratorConfig) -> TTSResult<Self> {
        Ok(Self::with_tts(
            ElevenLabsTTS::new(config)?,
            config.output_dir.clone(),
        ))
    }

    pub fn with_tts(tts: ElevenLabsTTS, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            tts,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate one clip.
    ///
    /// The target file is only touched after the complete audio payload has
    /// been received, and is replaced atomically.
    pub async fn generate(&self, clip: &Clip) -> ClipOutcome {
        let audio = match self.tts.synthesize(clip.text).await {
            Ok(audio) => audio,
            Err(err) => {
                let outcome = ClipOutcome::from(err);
                warn!(clip = clip.id, error = %outcome, "Clip generation failed");
                return outcome;
            }
        };

        let path = clip_path(&self.output_dir, clip.id);
        match write_atomic(&path, &audio).await {
            Ok(()) => {
                debug!(clip = clip.id, path = %path.display(), bytes = audio.len(), "Clip written");
                ClipOutcome::Written {
                    path,
                    bytes: audio.len(),
                }
            }
            Err(e) => {
                warn!(clip = clip.id, path = %path.display(), error = %e, "Failed to write clip");
                ClipOutcome::WriteFailed {
                    path,
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Write `data` to a sibling temp file, then rename it over `path`
async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".part");
    let tmp_path = path.with_file_name(tmp_name);

    if let Err(e) = tokio::fs::write(&tmp_path, data).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clip_path() {
        let path = clip_path(Path::new("assets/audio/voice"), "good");
        assert_eq!(path, PathBuf::from("assets/audio/voice/good.mp3"));
    }

    #[test]
    fn test_outcome_from_provider_error() {
        let outcome = ClipOutcome::from(TTSError::ProviderError {
            status: 401,
            body: "unauthorized".to_string(),
        });
        assert_eq!(
            outcome,
            ClipOutcome::Rejected {
                status: 401,
                body: "unauthorized".to_string()
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.to_string(), "401 - unauthorized");
    }

    #[test]
    fn test_outcome_from_request_failure() {
        let outcome = ClipOutcome::from(TTSError::RequestFailed("connection refused".into()));
        assert!(matches!(outcome, ClipOutcome::TransportFailed { .. }));
        assert!(outcome.to_string().contains("connection refused"));
    }

    #[test]
    fn test_written_is_success() {
        let outcome = ClipOutcome::Written {
            path: PathBuf::from("good.mp3"),
            bytes: 3,
        };
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("good.mp3");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!dir.path().join("good.mp3.part").exists());
    }

    #[tokio::test]
    async fn test_write_atomic_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("good.mp3");

        assert!(write_atomic(&path, b"audio").await.is_err());
        assert!(!path.exists());
    }
}
