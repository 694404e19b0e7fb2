use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use candidate::config::Settings;
use candidate::kp;

#[derive(Parser)]
#[command(name = "cand")]
#[command(about = "Hard eligibility gates and deterministic knowledge packs")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "CANDIDATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a knowledge pack as indented JSON
    Show {
        /// Path to the knowledge pack
        path: PathBuf,
    },
    /// Check that a knowledge pack re-encodes byte for byte
    Verify {
        /// Path to the knowledge pack
        path: PathBuf,
    },
    /// Rewrite a JSON document as a canonical knowledge pack
    Save {
        /// JSON document to read
        input: PathBuf,
        /// Knowledge pack to write
        output: PathBuf,
    },
    /// Evaluate the hard gates for a job and a candidate profile
    Gate {
        /// Job profile (JSON)
        job: PathBuf,
        /// Candidate profile (JSON)
        candidate: PathBuf,
    },
}

/// Initialize tracing on stderr so stdout carries only command output
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => Ok(Settings::from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?),
        None => Settings::try_load(),
    };
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&settings.log_filter);
    if let Err(e) = loaded {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    match cli.command {
        Commands::Show { path } => {
            let pack = kp::load(&path)
                .with_context(|| format!("Failed to load knowledge pack {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&pack)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { path } => verify(&path),
        Commands::Save { input, output } => {
            let pack = kp::load(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            kp::save(&output, &pack)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote knowledge pack {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Gate { job, candidate } => {
            let job_profile = kp::load(&job)
                .with_context(|| format!("Failed to load job profile {}", job.display()))?;
            let candidate_profile = kp::load(&candidate).with_context(|| {
                format!("Failed to load candidate profile {}", candidate.display())
            })?;

            let result = settings
                .gates
                .evaluate(&job_profile.thaw(), &candidate_profile.thaw());
            println!("{}", serde_json::to_string_pretty(&result)?);

            Ok(if result.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

fn verify(path: &Path) -> anyhow::Result<ExitCode> {
    if !path.exists() {
        println!("Missing source file: {}", path.display());
        return Ok(ExitCode::from(2));
    }

    let report = kp::verify_round_trip(path)
        .with_context(|| format!("Failed to verify knowledge pack {}", path.display()))?;

    if report.identical {
        println!("Round-trip byte-identical: PASS");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Round-trip byte-identical: FAIL");
        println!(
            "orig: {} bytes, new: {} bytes",
            report.original_len, report.rewritten_len
        );
        Ok(ExitCode::from(3))
    }
}
