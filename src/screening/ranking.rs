//! Gene-symbol extraction, sorting, and rank assignment.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::hit::Hit;
use crate::core::row::RankedRow;

/// An alphanumeric token inside parentheses, immediately followed by a
/// comma — the gene symbol position in RefSeq definition lines, e.g.
/// `"Homo sapiens hemoglobin subunit beta (HBB), mRNA"`.
fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([A-Za-z0-9]+)\),").expect("valid symbol pattern"))
}

/// Extract the short display symbol from a subject definition line.
///
/// The extraction is inherently partial: definition lines without the
/// parenthetical token yield `None`, which is not an error.
#[must_use]
pub fn extract_gene_symbol(definition: &str) -> Option<String> {
    symbol_pattern()
        .captures(definition)
        .map(|captures| captures[1].to_string())
}

/// Project filtered hits into ranked rows.
///
/// Rows are sorted ascending by mismatch count, ties broken ascending by
/// display name (unnamed rows sort before any named row), then indexed
/// 1..N in the post-sort order. Nothing is deduplicated: repeated
/// alignments against the same subject at different coordinates stay
/// distinct rows.
#[must_use]
pub fn rank(hits: Vec<Hit>) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = hits
        .into_iter()
        .map(|hit| RankedRow {
            index: 0,
            name: hit.definition.as_deref().and_then(extract_gene_symbol),
            accession: hit.accession,
            mismatch: hit.mismatch.unwrap_or(0),
            alignment: hit.alignment,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.mismatch
            .cmp(&b.mismatch)
            .then_with(|| a.name.cmp(&b.name))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.index = i + 1;
    }

    rows
}
