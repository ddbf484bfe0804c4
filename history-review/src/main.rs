//! QDI History Review CLI.
//!
//! Prints one pretty-printed JSON document per invocation. Exits 1 when
//! input cannot be read or decoded, or when the resulting threshold
//! check did not pass.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atom_trail::ProvenanceTrail;
use history_review::cascade::cascade_integration;
use history_review::cli::{Cli, Command};
use history_review::review::HistoryReviewOrchestrator;
use history_review::types::{DecisionInput, Result, ReviewError, TraceInput};
use history_review::VORTEX_MARKER;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("history_review={},warn", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(result) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&result).unwrap_or_default()
            );
            if threshold_failed(&result) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            let envelope = serde_json::json!({
                "error": error.to_string(),
                "vortex": VORTEX_MARKER,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&envelope).unwrap_or_default()
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<serde_json::Value> {
    let orchestrator = HistoryReviewOrchestrator::new();
    let trail = ProvenanceTrail::new(&cli.trail_dir);

    let value = match &cli.command {
        Command::Review { trace_file, record } => {
            let input = match trace_file {
                Some(path) => load_trace(path)?,
                None => HistoryReviewOrchestrator::sample_trace(),
            };
            let report = orchestrator.review(input, record.then_some(&trail))?;
            serde_json::to_value(report).map_err(ReviewError::Encode)?
        }
        Command::Surject { decision_json } => {
            let input = match decision_json {
                Some(raw) => {
                    serde_json::from_str::<DecisionInput>(raw)
                        .map_err(ReviewError::DecisionDecode)?
                }
                None => DecisionInput::default(),
            };
            serde_json::to_value(orchestrator.surject(input))
                .map_err(ReviewError::Encode)?
        }
        Command::Audit { threshold, input } => {
            let text = input
                .as_deref()
                .unwrap_or("Sample text for superposition audit.");
            serde_json::to_value(orchestrator.audit(text, *threshold))
                .map_err(ReviewError::Encode)?
        }
        Command::Boost { input, iteration } => {
            let text = input
                .as_deref()
                .unwrap_or("Sample text for inference boost calculation.");
            serde_json::to_value(orchestrator.boost(text, *iteration))
                .map_err(ReviewError::Encode)?
        }
        Command::Cascade { pr_body } => {
            let report = cascade_integration(&trail, pr_body.as_deref())?;
            serde_json::to_value(report).map_err(ReviewError::Encode)?
        }
    };

    Ok(value)
}

/// Load and decode a trace document, classifying I/O failures.
fn load_trace(path: &Path) -> Result<TraceInput> {
    let content = fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ReviewError::TraceNotFound(path.display().to_string()),
        ErrorKind::PermissionDenied => ReviewError::PermissionDenied(path.display().to_string()),
        _ => ReviewError::TraceIo {
            path: path.display().to_string(),
            source: error,
        },
    })?;

    serde_json::from_str(&content).map_err(ReviewError::TraceDecode)
}

/// A result document with an explicit failed threshold check fails the run.
fn threshold_failed(result: &serde_json::Value) -> bool {
    result
        .get("threshold_check")
        .and_then(|check| check.get("passed"))
        .and_then(serde_json::Value::as_bool)
        == Some(false)
}
