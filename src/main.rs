use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use voicegen::{
    Catalog, ConfigError, GeneratorConfig,
    config::{API_KEY_ENV, resolve_output_dir},
    runner,
};

/// Exit code when one or more clips failed
const EXIT_PARTIAL_FAILURE: u8 = 1;
/// Exit code when the run could not start
const EXIT_SETUP_FAILURE: u8 = 2;

/// voicegen - generate voice-guidance clips with ElevenLabs
#[derive(Parser, Debug)]
#[command(name = "voicegen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write clips to (overrides config and environment)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Only generate these clips (comma-separated ids)
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    only: Vec<String>,

    /// Print what would be generated without calling the API
    #[arg(long)]
    dry_run: bool,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the clip catalog
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Progress goes to stdout; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run_cli(cli).await {
        Ok(code) => code,
        Err(err) => {
            if matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingApiKey)
            ) {
                print_api_key_help();
            } else {
                eprintln!("ERROR: {err:#}");
            }
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

async fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let builtin = Catalog::builtin();

    if let Some(Commands::List) = cli.command {
        for clip in &builtin {
            println!("{:<20} {}", clip.id, clip.text);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let catalog = if cli.only.is_empty() {
        builtin
    } else {
        builtin.select(cli.only.as_slice())?
    };

    if cli.dry_run {
        let output_dir = match cli.output_dir {
            Some(dir) => dir,
            None => resolve_output_dir(cli.config.as_deref())?,
        };
        runner::print_plan(&catalog, &output_dir);
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration from file or environment
    let mut config = match cli.config {
        Some(ref config_path) => {
            println!("Loading configuration from {}", config_path.display());
            GeneratorConfig::from_file(config_path)?
        }
        None => GeneratorConfig::from_env()?,
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let summary = runner::run(&config, &catalog)
        .await
        .context("Generation run could not start")?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PARTIAL_FAILURE))
    }
}

fn print_api_key_help() {
    println!("ERROR: {API_KEY_ENV} environment variable not set.");
    println!("\nTo get your API key:");
    println!("1. Go to https://elevenlabs.io");
    println!("2. Sign up for free");
    println!("3. Go to Profile > API Keys");
    println!("4. Copy your API key");
    println!("\nThen run:");
    println!("  export {API_KEY_ENV}=\"your-api-key\"");
    println!("  voicegen");
}
