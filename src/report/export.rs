//! The flat export encoding and its round-trip decoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::row::RankedRow;

/// Fixed header line of the flat export text, part of the external contract
pub const EXPORT_HEADER: &str = "Index\tName\tAccession\tMismatch\tAlignment";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export text is missing the expected header line")]
    MissingHeader,

    #[error("Malformed export row on line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// One decoded line of the flat export text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub index: usize,
    pub name: String,
    pub accession: String,
    pub mismatch: u64,
    pub alignment: String,
}

/// Encode ranked rows as the flat export text.
///
/// One tab-separated line per row after the fixed header, `\n` terminated.
/// Alignment blocks are flattened to single-space-joined text; this
/// encoding is meant for machine consumption, not visual stacking. An
/// empty row set encodes to the empty string — nothing to download.
#[must_use]
pub fn encode(rows: &[RankedRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(rows.len() * 64);
    out.push_str(EXPORT_HEADER);
    out.push('\n');

    for row in rows {
        let alignment = row
            .alignment
            .as_ref()
            .map(|block| block.flattened())
            .unwrap_or_default();
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            row.index,
            row.display_name(),
            row.accession,
            row.mismatch,
            alignment
        ));
    }

    out
}

/// Decode previously produced flat export text back into records.
///
/// The empty string and a header-only text both decode to zero records;
/// callers must treat both as "nothing to download". Decoding performs no
/// reinterpretation beyond re-splitting on newlines and tabs, so for any
/// non-empty row set `decode(encode(rows))` reproduces exactly the
/// (index, name, accession, mismatch) tuples that generated it.
///
/// # Errors
///
/// Returns `ExportError::MissingHeader` if non-empty text does not begin
/// with the fixed header, or `ExportError::MalformedRow` for a row with
/// fewer than five fields or non-numeric index/mismatch fields.
pub fn decode(text: &str) -> Result<Vec<ExportRecord>, ExportError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header == EXPORT_HEADER => {}
        _ => return Err(ExportError::MissingHeader),
    }

    let mut records = Vec::new();
    for (i, line) in lines {
        if line.is_empty() {
            continue;
        }
        // Alignment is the tail field and may contain spaces, never tabs
        let fields: Vec<&str> = line.splitn(5, '\t').collect();
        if fields.len() < 5 {
            return Err(ExportError::MalformedRow {
                line: i + 1,
                reason: format!("expected 5 tab-separated fields, found {}", fields.len()),
            });
        }

        let index: usize = fields[0].parse().map_err(|_| ExportError::MalformedRow {
            line: i + 1,
            reason: format!("invalid index: '{}'", fields[0]),
        })?;
        let mismatch: u64 = fields[3].parse().map_err(|_| ExportError::MalformedRow {
            line: i + 1,
            reason: format!("invalid mismatch count: '{}'", fields[3]),
        })?;

        records.push(ExportRecord {
            index,
            name: fields[1].to_string(),
            accession: fields[2].to_string(),
            mismatch,
            alignment: fields[4].to_string(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::AlignmentText;

    fn row(index: usize, name: Option<&str>, mismatch: u64) -> RankedRow {
        RankedRow {
            index,
            name: name.map(str::to_string),
            accession: format!("NM_000{index}.1"),
            mismatch,
            alignment: AlignmentText::new("ACGT", "||| ", "ACGA"),
        }
    }

    #[test]
    fn test_encode_header_and_rows() {
        let text = encode(&[row(1, Some("ABC1"), 0), row(2, None, 2)]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], EXPORT_HEADER);
        assert_eq!(lines[1], "1\tABC1\tNM_0001.1\t0\tACGT ||| ACGA");
        assert_eq!(lines[2], "2\t\tNM_0002.1\t2\tACGT ||| ACGA");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_encode_empty_rows_is_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_round_trip_reproduces_tuples() {
        let rows = vec![row(1, Some("ABC1"), 0), row(2, Some("XYZ2"), 2), row(3, None, 4)];
        let records = decode(&encode(&rows)).unwrap();

        assert_eq!(records.len(), rows.len());
        for (record, original) in records.iter().zip(&rows) {
            assert_eq!(record.index, original.index);
            assert_eq!(record.name, original.display_name());
            assert_eq!(record.accession, original.accession);
            assert_eq!(record.mismatch, original.mismatch);
        }
    }

    #[test]
    fn test_decode_empty_and_header_only() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode(&format!("{EXPORT_HEADER}\n")).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_missing_header() {
        let err = decode("1\tABC1\tNM_0001.1\t0\t\n").unwrap_err();
        assert!(matches!(err, ExportError::MissingHeader));
    }

    #[test]
    fn test_decode_rejects_short_row() {
        let text = format!("{EXPORT_HEADER}\n1\tABC1\tNM_0001.1\n");
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, ExportError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_decode_rejects_bad_numeric() {
        let text = format!("{EXPORT_HEADER}\none\tABC1\tNM_0001.1\t0\tx\n");
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, ExportError::MalformedRow { line: 2, .. }));
    }
}
