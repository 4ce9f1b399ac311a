//! Parsers for raw alignment-result documents.
//!
//! This module decodes the two output shapes produced by the external search
//! tool into a uniform stream of [`Hit`] entities:
//!
//! - **Tabular** (`-outfmt 6`/`7`): one tab-separated record per line with
//!   at least 12 fields in fixed positional order
//! - **Tree** (`-outfmt 5`): an XML document nesting iterations → hits →
//!   alignment segments (HSPs)
//!
//! Malformed individual records are skipped with a warning; a document that
//! is not recognizable as either shape at all is a fatal
//! [`ParseError::UnrecognizedFormat`], reported distinctly from an empty
//! result.
//!
//! ## Example
//!
//! ```rust
//! use probe_screen::parsing::{parse_text, DocumentFormat};
//!
//! let line = "probe-1\tNM_000518.5\t95.000\t20\t1\t0\t1\t20\t100\t119\t0.001\t40.1\n";
//! let doc = parse_text(line, Some(DocumentFormat::Tabular)).unwrap();
//! assert_eq!(doc.hits.len(), 1);
//! ```
//!
//! [`Hit`]: crate::core::hit::Hit
//! [`ParseError::UnrecognizedFormat`]: tabular::ParseError::UnrecognizedFormat

pub mod tabular;
pub mod xml;

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::core::hit::Hit;
use crate::parsing::tabular::ParseError;

/// Supported shapes of a raw alignment-result document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Tab-separated records, ≥12 fields per line
    Tabular,
    /// Nested iteration/hit/segment XML document
    Xml,
}

impl DocumentFormat {
    /// Sniff the document shape from its leading bytes.
    ///
    /// Tree documents open with XML markup (a declaration, a doctype, or
    /// the root element); everything else is treated as tabular.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let head = text.trim_start();
        if head.starts_with("<?xml") || head.starts_with("<!DOCTYPE") || head.starts_with('<') {
            Self::Xml
        } else {
            Self::Tabular
        }
    }
}

/// Parsed hits plus the total record count seen, for diagnostics.
///
/// `total_records` includes records that were skipped as malformed, so
/// callers can report how much of the document survived parsing.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub hits: Vec<Hit>,
    pub total_records: usize,
}

/// Parse an in-memory document, auto-detecting the shape unless one is given.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` if the document cannot be
/// recognized as the expected shape, or `ParseError::TooManyHits` if the
/// record limit is exceeded.
pub fn parse_text(
    text: &str,
    format: Option<DocumentFormat>,
) -> Result<ParsedDocument, ParseError> {
    match format.unwrap_or_else(|| DocumentFormat::detect(text)) {
        DocumentFormat::Tabular => tabular::parse_tabular_text(text),
        DocumentFormat::Xml => xml::parse_xml_text(text),
    }
}

/// Parse a document from a file, transparently decompressing `.gz` inputs.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, plus the errors of
/// [`parse_text`].
pub fn parse_file(
    path: &Path,
    format: Option<DocumentFormat>,
) -> Result<ParsedDocument, ParseError> {
    let text = read_document(path)?;
    parse_text(&text, format)
}

/// Read a document into memory, gunzipping when the extension says so.
/// The handle is released before parsing begins.
fn read_document(path: &Path) -> Result<String, ParseError> {
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        let file = std::fs::File::open(path)?;
        let mut decoder = GzDecoder::new(file);
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
