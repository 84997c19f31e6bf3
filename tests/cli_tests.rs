//! CLI Tests
//!
//! Drives the built `voicegen` binary and checks exit codes, stdout and the
//! files it leaves behind.

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MOCK_AUDIO: &[u8] = b"ID3\x04\x00mock-mp3-frames";

const CONFIG_ENV_VARS: &[&str] = &[
    "ELEVENLABS_API_KEY",
    "ELEVENLABS_BASE_URL",
    "ELEVENLABS_VOICE_ID",
    "ELEVENLABS_MODEL_ID",
    "VOICEGEN_OUTPUT_DIR",
    "VOICEGEN_REQUEST_TIMEOUT_SECONDS",
];

/// Build a command isolated from the caller's environment and `.env` file
fn voicegen(workdir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_voicegen"));
    cmd.current_dir(workdir).env("RUST_LOG", "off");
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

async fn run(cmd: &mut Command) -> Output {
    cmd.output().await.expect("Failed to run voicegen binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Offline Commands
// =============================================================================

#[tokio::test]
async fn test_cli_list_prints_catalog() {
    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path()).arg("list")).await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 16);
    assert!(out.lines().next().unwrap().starts_with("breathing_intro"));
    assert!(out.contains("Workout complete. Great job!"));
}

#[tokio::test]
async fn test_cli_dry_run_needs_no_credential() {
    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path()).args(["--dry-run", "--only", "good"])).await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Would generate 1 voice clips:"));
    assert!(out.contains("assets/audio/voice/good.mp3"));
    assert!(!workdir.path().join("assets").exists());
}

#[tokio::test]
async fn test_cli_unknown_clip_id() {
    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path()).args(["--dry-run", "--only", "good,nope"])).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}

// =============================================================================
// Preconditions
// =============================================================================

#[tokio::test]
async fn test_cli_missing_api_key() {
    let workdir = TempDir::new().unwrap();
    let output = run(&mut voicegen(workdir.path())).await;

    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("ELEVENLABS_API_KEY environment variable not set"));
    assert!(out.contains("export ELEVENLABS_API_KEY="));
    assert!(!workdir.path().join("assets").exists());
}

#[tokio::test]
async fn test_cli_blank_api_key_is_missing() {
    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path()).env("ELEVENLABS_API_KEY", "   ")).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(!workdir.path().join("assets").exists());
}

#[tokio::test]
async fn test_cli_rejects_plain_http_base_url() {
    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path())
        .env("ELEVENLABS_API_KEY", "test-api-key")
        .env("ELEVENLABS_BASE_URL", "http://api.example.com/v1"))
    .await;

    assert_eq!(output.status.code(), Some(2));
    assert!(!workdir.path().join("assets").exists());
}

// =============================================================================
// Generation Runs
// =============================================================================

#[tokio::test]
async fn test_cli_successful_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .and(header("xi-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MOCK_AUDIO))
        .expect(2)
        .mount(&server)
        .await;

    let workdir = TempDir::new().unwrap();
    let output = run(voicegen(workdir.path())
        .args(["--only", "good,siren"])
        .env("ELEVENLABS_API_KEY", "test-api-key")
        .env("ELEVENLABS_BASE_URL", server.uri()))
    .await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Generating 2 voice clips..."));
    assert!(out.contains("  Generated: siren.mp3"));
    assert!(out.contains("  Generated: good.mp3"));
    assert!(out.contains("Complete! Generated 2/2 voice clips."));
    assert!(out.contains("All voice clips generated successfully!"));

    let voice_dir = workdir.path().join("assets/audio/voice");
    assert_eq!(std::fs::read(voice_dir.join("good.mp3")).unwrap(), MOCK_AUDIO);
    assert_eq!(std::fs::read(voice_dir.join("siren.mp3")).unwrap(), MOCK_AUDIO);
}

#[tokio::test]
async fn test_cli_failed_run_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let workdir = TempDir::new().unwrap();
    let voice_dir = workdir.path().join("out");
    let output = run(voicegen(workdir.path())
        .args(["--only", "good", "--output-dir"])
        .arg(&voice_dir)
        .env("ELEVENLABS_API_KEY", "test-api-key")
        .env("ELEVENLABS_BASE_URL", server.uri()))
    .await;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("  ERROR generating good: 401 - unauthorized"));
    assert!(out.contains("Complete! Generated 0/1 voice clips."));
    assert!(out.contains("Some clips failed. Check your API key and try again."));
    assert!(voice_dir.is_dir());
    assert!(!voice_dir.join("good.mp3").exists());
}

#[tokio::test]
async fn test_cli_yaml_config_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech/customVoice"))
        .and(header("xi-api-key", "yaml-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MOCK_AUDIO))
        .expect(1)
        .mount(&server)
        .await;

    let workdir = TempDir::new().unwrap();
    let config_path = workdir.path().join("voicegen.yaml");
    std::fs::write(
        &config_path,
        format!(
            "api:\n  api_key: yaml-api-key\n  base_url: {}\nvoice:\n  voice_id: customVoice\noutput:\n  dir: clips\n",
            server.uri()
        ),
    )
    .unwrap();

    let output = run(voicegen(workdir.path())
        .args(["--only", "hold", "--config"])
        .arg(&config_path))
    .await;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Loading configuration from"));
    assert!(workdir.path().join("clips/hold.mp3").is_file());
}
