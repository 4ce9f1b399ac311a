//! # probe-screen
//!
//! A library for screening short nucleic-acid probe sequences against
//! reference transcripts.
//!
//! When designing a hybridization probe or antisense oligo, the question is
//! which transcripts it would actually bind above a chosen stringency. An
//! external search tool (e.g. NCBI `blastn` against `refseq_rna`) produces
//! the raw per-hit alignment records; `probe-screen` turns those records
//! into a canonical, filtered, ranked report plus a lossless export
//! encoding for later download.
//!
//! ## Features
//!
//! - **Two input shapes**: tabular (outfmt 6/7) and XML (outfmt 5) results
//! - **Two stringency modes**: percent-identity threshold or max-mismatch
//!   count with a forward-strand constraint
//! - **Gene-symbol extraction**: short display names pulled from subject
//!   definition lines
//! - **Stable ranking**: dense 1-based indices over a deterministic sort
//! - **Round-trip export**: flat tab-separated text that decodes back to
//!   exactly the rows that produced it
//!
//! ## Example
//!
//! ```rust
//! use probe_screen::parsing::parse_text;
//! use probe_screen::screening::{FilterMode, ScreenConfig, ScreeningEngine};
//! use probe_screen::{report, Probe};
//!
//! let probe = Probe::parse("ACGTACGTACGTACGTACGT").unwrap();
//!
//! let results = "probe-1\tNM_000518.5\t95.000\t20\t1\t0\t1\t20\t100\t119\t0.001\t40.1\n";
//! let doc = parse_text(results, None).unwrap();
//!
//! let config = ScreenConfig::new(FilterMode::PercentIdentity { min_pct: 90.0 }, "9606");
//! let screen_report = ScreeningEngine::new(config).screen(doc, &probe);
//!
//! println!("{}", report::table::render_text(&screen_report));
//! let export_text = report::export::encode(&screen_report.rows);
//! assert!(export_text.starts_with("Index\tName\tAccession\tMismatch\tAlignment"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for probes, hits, and ranked rows
//! - [`parsing`]: Parsers for tabular and XML alignment documents
//! - [`screening`]: Metric normalization, filtering, and ranking
//! - [`report`]: Display table, export codec, and download store
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod report;
pub mod screening;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::hit::{AlignmentText, Hit};
pub use crate::core::probe::{Probe, ValidationError};
pub use crate::core::row::{RankedRow, ScreenReport};
pub use crate::parsing::{DocumentFormat, ParsedDocument};
pub use crate::screening::{FilterMode, ScreenConfig, ScreeningEngine};
