//! Command-line interface for history review.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// QDI History Review - coherence scoring and provenance cascade
#[derive(Parser, Debug, Clone)]
#[command(name = "history-review")]
#[command(about = "Score history traces for coherence and track decisions in the ATOM trail")]
pub struct Cli {
    /// Root directory of the ATOM provenance trail
    #[arg(long, env = "ATOM_TRAIL_DIR", default_value = atom_trail::DEFAULT_TRAIL_DIR)]
    pub trail_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Review a history trace for coherence
    Review {
        /// Path to a trace JSON file; a built-in sample is reviewed if omitted
        trace_file: Option<PathBuf>,

        /// Record the review as a REVIEW decision in the provenance trail
        #[arg(long)]
        record: bool,
    },

    /// Surject a decision record to symbolic operation codes
    Surject {
        /// Decision JSON string; defaults apply if omitted
        decision_json: Option<String>,
    },

    /// Audit text for superposition readiness
    Audit {
        /// Coherence threshold (0-1)
        #[arg(long, short = 't', default_value_t = 0.6)]
        threshold: f64,

        /// Text to audit
        #[arg(long, short = 'i')]
        input: Option<String>,
    },

    /// Calculate the inference boost for text
    Boost {
        /// Text to boost
        #[arg(long, short = 'i')]
        input: Option<String>,

        /// Fibonacci iteration
        #[arg(long, short = 'n', default_value_t = 1)]
        iteration: usize,
    },

    /// Cascade provenance integration for a PR body
    Cascade {
        /// Pull request body text
        #[arg(long, short = 'p')]
        pr_body: Option<String>,
    },
}
