use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::core::hit::Hit;
use crate::parsing::ParsedDocument;
use crate::utils::validation::check_hit_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized alignment document: {0}")]
    UnrecognizedFormat(String),

    #[error("Too many hits: {0} exceeds maximum allowed (100000)")]
    TooManyHits(usize),
}

/// Parse a tabular results file (12+ tab-separated fields per line).
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::TooManyHits` if the record limit is exceeded.
pub fn parse_tabular_file(path: &Path) -> Result<ParsedDocument, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_tabular_text(&text)
}

/// Parse tabular results text.
///
/// Field order is fixed: query id, subject id, percent identity, alignment
/// length, mismatches, gap opens, q.start, q.end, s.start, s.end, e-value,
/// bit score. Lines with fewer than 12 fields are skipped, as are lines
/// whose numeric fields fail to parse; neither is fatal. Blank lines and
/// `#` comment lines (outfmt 7) are ignored entirely.
///
/// Zero successfully parsed lines is a valid empty result, not an error.
///
/// # Errors
///
/// Returns `ParseError::TooManyHits` if the record limit is exceeded.
pub fn parse_tabular_text(text: &str) -> Result<ParsedDocument, ParseError> {
    let mut hits = Vec::new();
    let mut total_records = 0;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        total_records += 1;

        // Line numbers in warnings are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            warn!(
                line = line_num,
                fields = fields.len(),
                "Skipping tabular line with fewer than 12 fields"
            );
            continue;
        }

        match parse_record(&fields) {
            Ok(hit) => {
                if check_hit_limit(hits.len()).is_some() {
                    return Err(ParseError::TooManyHits(hits.len()));
                }
                hits.push(hit);
            }
            Err(reason) => {
                warn!(line = line_num, %reason, "Skipping malformed tabular line");
            }
        }
    }

    Ok(ParsedDocument {
        hits,
        total_records,
    })
}

/// Build one hit from a well-formed-length record.
/// Any numeric parse failure is an error for this line only.
fn parse_record(fields: &[&str]) -> Result<Hit, String> {
    let identity_pct: f64 = parse_field(fields[2], "percent identity")?;
    let align_len: u64 = parse_field(fields[3], "alignment length")?;
    let mismatch: u64 = parse_field(fields[4], "mismatches")?;
    let gap_opens: u64 = parse_field(fields[5], "gap opens")?;
    let q_start: u64 = parse_field(fields[6], "query start")?;
    let q_end: u64 = parse_field(fields[7], "query end")?;
    let s_start: u64 = parse_field(fields[8], "subject start")?;
    let s_end: u64 = parse_field(fields[9], "subject end")?;
    let e_value: f64 = parse_field(fields[10], "e-value")?;
    let bit_score: f64 = parse_field(fields[11], "bit score")?;

    Ok(Hit {
        query_id: fields[0].to_string(),
        accession: fields[1].to_string(),
        definition: None,
        identity_pct: Some(identity_pct),
        identity_count: None,
        align_len,
        mismatch: Some(mismatch),
        gap_opens,
        q_start,
        q_end,
        s_start,
        s_end,
        e_value,
        bit_score,
        // Tabular output is strandless; records are reported forward
        frame: 1,
        alignment: None,
    })
}

fn parse_field<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{raw}'"))
}
