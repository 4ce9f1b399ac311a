//! Command-line interface for probe-screen.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **screen**: Screen a probe against an alignment-results file
//! - **export**: Validate and store export text for download
//!
//! ## Usage
//!
//! ```text
//! # Percent-identity screening of tabular results
//! probe-screen screen results.tsv --probe ACGTACGTACGTACGTACGT --min-identity 90
//!
//! # Max-mismatch screening of XML results, saving the export text
//! probe-screen screen results.xml --probe ACGTACGTACGTACGTACGT \
//!     --max-mismatch 4 --save-export downloads/
//!
//! # Pipe results from stdin
//! cat results.tsv | probe-screen screen - --probe ACGTACGTACGTACGTACGT
//!
//! # JSON output for scripting
//! probe-screen screen results.tsv --probe ACGT... --format json
//!
//! # Persist previously produced export text under a download name
//! probe-screen export results_export.tsv --taxid 9606 --out-dir downloads/
//! ```

use clap::{Parser, Subcommand};

pub mod export;
pub mod screen;

#[derive(Parser)]
#[command(name = "probe-screen")]
#[command(version)]
#[command(about = "Screen short nucleic-acid probes against reference transcripts")]
#[command(
    long_about = "probe-screen turns raw alignment results for a short probe sequence into a ranked report of the reference transcripts it matches.\n\nIt accepts the search tool's tabular or XML output, applies a percent-identity or max-mismatch stringency filter, extracts gene symbols, and renders:\n- A ranked display table\n- A lossless tab-separated export for download"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen a probe against alignment results
    Screen(screen::ScreenArgs),

    /// Validate and store export text for download
    Export(export::ExportArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
