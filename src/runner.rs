//! Run orchestration.
//!
//! A run creates the output directory, generates every clip in catalog order
//! with a fixed pause after each request, and reports how many clips were
//! written. Requests are strictly sequential.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, Clip};
use crate::config::GeneratorConfig;
use crate::core::tts::TTSError;
use crate::generator::{ClipGenerator, ClipOutcome, clip_path};

/// Errors that stop a run before any clip is attempted
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Client(#[from] TTSError),
}

/// Outcome of one clip within a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipReport {
    pub id: &'static str,
    pub outcome: ClipOutcome,
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<ClipReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// True when every clip was written. An empty run counts as success.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Identifiers of clips that were not written
    pub fn failed_ids(&self) -> Vec<&'static str> {
        self.reports
            .iter()
            .filter(|report| !report.outcome.is_success())
            .map(|report| report.id)
            .collect()
    }

    /// Tally line printed after the run
    pub fn tally_line(&self) -> String {
        format!(
            "Complete! Generated {}/{} voice clips.",
            self.succeeded(),
            self.total()
        )
    }

    /// Final status lines printed after the tally
    pub fn status_lines(&self) -> &'static [&'static str] {
        if self.all_succeeded() {
            &[
                "All voice clips generated successfully!",
                "You can now rebuild the app to use the new voices.",
            ]
        } else {
            &["Some clips failed. Check your API key and try again."]
        }
    }
}

/// Progress line for one finished clip
pub fn progress_line(clip: &Clip, outcome: &ClipOutcome) -> String {
    match outcome {
        ClipOutcome::Written { path, .. } => {
            let file = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            format!("  Generated: {file}")
        }
        failure => format!("  ERROR generating {}: {failure}", clip.id),
    }
}

/// Generate every clip in `catalog`.
///
/// Per-clip failures are recorded in the returned summary; only setup
/// failures (output directory, HTTP client) are returned as errors.
pub async fn run(config: &GeneratorConfig, catalog: &Catalog) -> Result<RunSummary, RunError> {
    let generator = ClipGenerator::new(config)?;
    run_with_generator(&generator, catalog, config.request_delay).await
}

/// Generate every clip in `catalog` with an existing generator.
pub async fn run_with_generator(
    generator: &ClipGenerator,
    catalog: &Catalog,
    request_delay: std::time::Duration,
) -> Result<RunSummary, RunError> {
    let output_dir = generator.output_dir();
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| RunError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

    println!("Generating {} voice clips...", catalog.len());
    println!("Output directory: {}\n", output_dir.display());
    info!(clips = catalog.len(), output_dir = %output_dir.display(), "Starting generation run");

    let mut summary = RunSummary {
        reports: Vec::with_capacity(catalog.len()),
    };

    for clip in catalog {
        let outcome = generator.generate(clip).await;
        println!("{}", progress_line(clip, &outcome));
        summary.reports.push(ClipReport {
            id: clip.id,
            outcome,
        });

        // Small delay to avoid rate limiting
        if !request_delay.is_zero() {
            tokio::time::sleep(request_delay).await;
        }
    }

    println!("\n{}", summary.tally_line());
    println!();
    for line in summary.status_lines() {
        println!("{line}");
    }
    info!(
        succeeded = summary.succeeded(),
        total = summary.total(),
        "Generation run finished"
    );

    Ok(summary)
}

/// Print what a run would do, without contacting the API or touching disk
pub fn print_plan(catalog: &Catalog, output_dir: &Path) {
    println!("Would generate {} voice clips:", catalog.len());
    for clip in catalog {
        println!(
            "  {} -> {} ({:?})",
            clip.id,
            clip_path(output_dir, clip.id).display(),
            clip.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn written(id: &'static str) -> ClipReport {
        ClipReport {
            id,
            outcome: ClipOutcome::Written {
                path: PathBuf::from(format!("{id}.mp3")),
                bytes: 10,
            },
        }
    }

    fn rejected(id: &'static str) -> ClipReport {
        ClipReport {
            id,
            outcome: ClipOutcome::Rejected {
                status: 401,
                body: "unauthorized".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_summary_is_success() {
        let summary = RunSummary::default();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.succeeded(), 0);
        assert!(summary.all_succeeded());
        assert_eq!(summary.tally_line(), "Complete! Generated 0/0 voice clips.");
        assert_eq!(
            summary.status_lines()[0],
            "All voice clips generated successfully!"
        );
    }

    #[test]
    fn test_partial_failure_summary() {
        let summary = RunSummary {
            reports: vec![written("inhale"), rejected("hold"), written("exhale")],
        };
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_succeeded());
        assert_eq!(summary.failed_ids(), vec!["hold"]);
        assert_eq!(summary.tally_line(), "Complete! Generated 2/3 voice clips.");
        assert_eq!(
            summary.status_lines(),
            &["Some clips failed. Check your API key and try again."]
        );
    }

    #[test]
    fn test_progress_lines() {
        let clip = Clip::new("good", "Good!");

        let line = progress_line(&clip, &written("good").outcome);
        assert_eq!(line, "  Generated: good.mp3");

        let line = progress_line(&clip, &rejected("good").outcome);
        assert_eq!(line, "  ERROR generating good: 401 - unauthorized");

        let outcome = ClipOutcome::TransportFailed {
            message: "Request failed: connection refused".to_string(),
        };
        assert_eq!(
            progress_line(&clip, &outcome),
            "  ERROR generating good: Request failed: connection refused"
        );
    }
}
