use serde::{Deserialize, Serialize};

/// The three aligned strings of one alignment segment, stacked
/// query-over-subject with the match midline between them.
///
/// All three strings are guaranteed to have equal length; a segment whose
/// strings disagree in length cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentText {
    /// Aligned query sequence, gaps included
    pub query: String,

    /// Match line ('|' at matching positions, ' ' elsewhere)
    pub midline: String,

    /// Aligned subject sequence, gaps included
    pub subject: String,
}

impl AlignmentText {
    /// Build an alignment block. Returns `None` unless query, midline, and
    /// subject have equal length.
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        midline: impl Into<String>,
        subject: impl Into<String>,
    ) -> Option<Self> {
        let query = query.into();
        let midline = midline.into();
        let subject = subject.into();

        if query.len() == midline.len() && midline.len() == subject.len() {
            Some(Self {
                query,
                midline,
                subject,
            })
        } else {
            None
        }
    }

    /// Render the three lines joined with the given separator.
    #[must_use]
    pub fn stacked(&self, separator: &str) -> String {
        format!(
            "{}{separator}{}{separator}{}",
            self.query, self.midline, self.subject
        )
    }

    /// Render the three lines joined with single spaces, for the flat
    /// export encoding.
    #[must_use]
    pub fn flattened(&self) -> String {
        self.stacked(" ")
    }
}

/// One reported alignment between the probe and a reference subject region.
///
/// A `Hit` is immutable once parsing and normalization complete; ranked rows
/// are built by projection, never by mutating the hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Query identifier as reported by the search tool
    pub query_id: String,

    /// Subject accession (e.g. `NM_000518.5`)
    pub accession: String,

    /// Subject definition line; may embed a gene symbol.
    /// Absent in tabular output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Percent identity over the alignment length.
    /// Reported directly in tabular output, derived for tree output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_pct: Option<f64>,

    /// Count of matching positions. Only reported in tree output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_count: Option<u64>,

    /// Alignment length, gaps included
    pub align_len: u64,

    /// Mismatch count. Reported directly in tabular output; derived as
    /// `probe_len - identity_count` for tree output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<u64>,

    /// Number of gap openings
    pub gap_opens: u64,

    /// 1-based query start position
    pub q_start: u64,

    /// 1-based query end position
    pub q_end: u64,

    /// 1-based subject start position
    pub s_start: u64,

    /// 1-based subject end position
    pub s_end: u64,

    /// Expectation value, non-negative
    pub e_value: f64,

    /// Bit score
    pub bit_score: f64,

    /// Strand/direction of the aligned segment; `+1` is the forward strand.
    /// Tabular output is strandless and records `+1`.
    pub frame: i32,

    /// Aligned sequence block. Only present in tree output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentText>,
}
