//! Screening engine: metric normalization, stringency filtering, and ranking.
//!
//! This module turns a parsed hit stream into the final report:
//!
//! - [`ScreeningEngine`]: Main entry point running the normalize → filter →
//!   rank pipeline for one invocation
//! - [`FilterMode`]: The two mutually exclusive stringency predicates
//! - [`ScreenConfig`]: Filter mode plus the opaque species pass-through
//!
//! ## Pipeline
//!
//! 1. **Normalize**: derive mismatch count and percent identity uniformly
//!    regardless of source format; discard hits that violate invariants
//! 2. **Filter**: apply the configured predicate; never reorders or
//!    deduplicates
//! 3. **Rank**: extract gene symbols, sort, assign dense 1-based indices
//!
//! ## Example
//!
//! ```rust
//! use probe_screen::parsing::parse_text;
//! use probe_screen::screening::{FilterMode, ScreenConfig, ScreeningEngine};
//! use probe_screen::Probe;
//!
//! let probe = Probe::parse("ACGTACGTACGTACGTACGT").unwrap();
//! let line = "probe-1\tNM_000518.5\t95.000\t20\t1\t0\t1\t20\t100\t119\t0.001\t40.1\n";
//! let doc = parse_text(line, None).unwrap();
//!
//! let config = ScreenConfig::new(FilterMode::PercentIdentity { min_pct: 90.0 }, "9606");
//! let report = ScreeningEngine::new(config).screen(doc, &probe);
//! assert_eq!(report.rows.len(), 1);
//! ```
//!
//! [`ScreeningEngine`]: engine::ScreeningEngine
//! [`FilterMode`]: engine::FilterMode
//! [`ScreenConfig`]: engine::ScreenConfig

pub mod engine;
pub mod ranking;

pub use engine::{FilterMode, ScreenConfig, ScreeningEngine};
