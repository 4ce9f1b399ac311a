use serde::{Deserialize, Serialize};

use crate::core::hit::AlignmentText;

/// One line of the final report.
///
/// Built by projecting a filtered [`Hit`](crate::core::hit::Hit) after
/// sorting; `index` is dense and 1-based in the post-sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// 1-based, contiguous rank assigned after filtering and sorting
    pub index: usize,

    /// Gene symbol extracted from the subject definition, when the
    /// extraction pattern matched. Rendered as empty otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Subject accession
    pub accession: String,

    /// Mismatch count
    pub mismatch: u64,

    /// Stacked alignment block, when the source format carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentText>,
}

impl RankedRow {
    /// Display name for rendering: the extracted symbol or the empty string
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Alignment block with display line breaks, or empty when absent
    #[must_use]
    pub fn display_alignment(&self) -> String {
        self.alignment
            .as_ref()
            .map(|block| block.stacked("\n"))
            .unwrap_or_default()
    }
}

/// Output of one screening invocation: the ranked rows plus the pre-filter
/// record count for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Ranked, indexed rows in report order
    pub rows: Vec<RankedRow>,

    /// Alignment records seen in the input document before filtering,
    /// including records skipped as malformed
    pub total_hits: usize,
}

impl ScreenReport {
    /// True when filtering left nothing to report.
    ///
    /// This is the valid "no hits found" outcome, distinct from a parse
    /// failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
