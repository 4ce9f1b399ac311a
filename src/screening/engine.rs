use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::hit::Hit;
use crate::core::probe::Probe;
use crate::core::row::ScreenReport;
use crate::parsing::ParsedDocument;
use crate::screening::ranking;

/// Safely convert a u64 count to f64 for percentage calculations
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Stringency predicate selected by the caller.
///
/// The two variants are mutually exclusive modes, never mixed in one run:
/// percent identity is the metric for tabular input, mismatch count for
/// tree input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep hits whose percent identity meets the threshold (0-100)
    PercentIdentity { min_pct: f64 },

    /// Keep forward-strand hits with at most this many mismatches.
    /// Reverse-strand hits are discarded unconditionally in this mode.
    MaxMismatch { max: u64 },
}

impl FilterMode {
    /// Check the threshold is in its documented range.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending value when the percent
    /// identity threshold falls outside `[0, 100]` or is not finite.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::PercentIdentity { min_pct } => {
                if min_pct.is_finite() && (0.0..=100.0).contains(&min_pct) {
                    Ok(())
                } else {
                    Err(format!(
                        "identity threshold must be between 0 and 100, got {min_pct}"
                    ))
                }
            }
            Self::MaxMismatch { .. } => Ok(()),
        }
    }

    /// The pure keep/drop predicate over one normalized hit.
    ///
    /// A hit whose required metric is absent fails the predicate.
    #[must_use]
    pub fn keep(&self, hit: &Hit) -> bool {
        match *self {
            Self::PercentIdentity { min_pct } => {
                hit.identity_pct.is_some_and(|pct| pct >= min_pct)
            }
            Self::MaxMismatch { max } => {
                hit.frame == 1 && hit.mismatch.is_some_and(|count| count <= max)
            }
        }
    }
}

/// Configuration for one screening invocation
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Stringency predicate
    pub mode: FilterMode,

    /// Opaque species identifier. Passed through to the search boundary and
    /// the export naming, never interpreted by the engine.
    pub species_taxid: String,
}

impl ScreenConfig {
    pub fn new(mode: FilterMode, species_taxid: impl Into<String>) -> Self {
        Self {
            mode,
            species_taxid: species_taxid.into(),
        }
    }
}

/// The main screening engine.
///
/// Synchronous and single-threaded per invocation; holds no state beyond
/// its configuration, so independent invocations share nothing mutable.
pub struct ScreeningEngine {
    config: ScreenConfig,
}

impl ScreeningEngine {
    pub fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Run normalize → filter → rank over a parsed document.
    ///
    /// The probe supplies the query length used to derive mismatch counts
    /// for tree-mode hits. An empty result is the valid "no hits" outcome.
    #[must_use]
    pub fn screen(&self, doc: ParsedDocument, probe: &Probe) -> ScreenReport {
        let total_hits = doc.total_records;

        let normalized = normalize(doc.hits, probe.len());
        let kept: Vec<Hit> = normalized
            .into_iter()
            .filter(|hit| self.config.mode.keep(hit))
            .collect();

        ScreenReport {
            rows: ranking::rank(kept),
            total_hits,
        }
    }
}

/// Fill derived metrics and drop hits that violate their own invariants.
///
/// For tree-mode hits (identity reported as a count), the mismatch count is
/// `probe_len - identity_count` and percent identity is derived over the
/// alignment length. Tabular hits carry both metrics already.
pub fn normalize(hits: Vec<Hit>, probe_len: u64) -> Vec<Hit> {
    hits.into_iter()
        .filter_map(|mut hit| {
            if let Some(reason) = inconsistent(&hit, probe_len) {
                warn!(accession = %hit.accession, reason, "Discarding inconsistent hit");
                return None;
            }

            if let Some(count) = hit.identity_count {
                if hit.mismatch.is_none() {
                    hit.mismatch = Some(probe_len - count);
                }
                if hit.identity_pct.is_none() && hit.align_len > 0 {
                    hit.identity_pct =
                        Some(count_to_f64(count) / count_to_f64(hit.align_len) * 100.0);
                }
            }

            Some(hit)
        })
        .collect()
}

/// Defensive consistency check; a failing hit is discarded, never the batch.
fn inconsistent(hit: &Hit, probe_len: u64) -> Option<&'static str> {
    if hit.e_value < 0.0 {
        return Some("negative e-value");
    }
    if let Some(count) = hit.identity_count {
        if count > hit.align_len {
            return Some("identity count exceeds alignment length");
        }
        if count > probe_len {
            return Some("identity count exceeds probe length");
        }
    }
    None
}
