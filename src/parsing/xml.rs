//! Parser for tree-structured (XML) alignment results.
//!
//! The document nests iterations → hits → alignment segments (HSPs). One
//! [`Hit`] is produced for every segment under every hit under every
//! iteration, combining the segment's own fields with the enclosing hit's
//! accession and definition and the enclosing iteration's query id.
//!
//! A segment missing a required field is skipped with a warning; remaining
//! segments continue. A document that is not well-formed XML, or contains
//! none of the expected elements, is a fatal
//! [`ParseError::UnrecognizedFormat`].

use std::path::Path;
use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

use crate::core::hit::{AlignmentText, Hit};
use crate::parsing::tabular::ParseError;
use crate::parsing::ParsedDocument;
use crate::utils::validation::check_hit_limit;

/// Parse a tree-structured results file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, plus the errors of
/// [`parse_xml_text`].
pub fn parse_xml_file(path: &Path) -> Result<ParsedDocument, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_xml_text(&text)
}

/// Parse tree-structured results text.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` if the text is not well-formed
/// XML or contains no alignment elements, or `ParseError::TooManyHits` if
/// the record limit is exceeded.
pub fn parse_xml_text(text: &str) -> Result<ParsedDocument, ParseError> {
    // Text is deliberately NOT trimmed by the reader: midlines are
    // whitespace-significant and must keep their length.
    let mut reader = Reader::from_str(text);

    let mut hits = Vec::new();
    let mut total_records = 0;
    let mut saw_structure = false;

    let mut query_def: Option<String> = None;
    let mut hit_accession: Option<String> = None;
    let mut hit_def: Option<String> = None;
    let mut segment: Option<SegmentBuilder> = None;

    // Innermost open element and its accumulated text
    let mut current: Option<Vec<u8>> = None;
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"BlastOutput" | b"Iteration" => saw_structure = true,
                    b"Hit" => {
                        saw_structure = true;
                        hit_accession = None;
                        hit_def = None;
                    }
                    b"Hsp" => {
                        saw_structure = true;
                        segment = Some(SegmentBuilder::default());
                    }
                    _ => {}
                }
                current = Some(name);
                text_buf.clear();
            }
            Ok(Event::Text(t)) => {
                if current.is_some() {
                    let value = t
                        .unescape()
                        .map_err(|e| ParseError::UnrecognizedFormat(e.to_string()))?;
                    text_buf.push_str(&value);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name().as_ref().to_vec();

                if current.as_deref() == Some(name.as_slice()) {
                    assign_field(
                        &name,
                        &text_buf,
                        &mut query_def,
                        &mut hit_accession,
                        &mut hit_def,
                        segment.as_mut(),
                    );
                }
                current = None;
                text_buf.clear();

                match name.as_slice() {
                    b"Hsp" => {
                        total_records += 1;
                        if let Some(builder) = segment.take() {
                            match builder.build(
                                query_def.as_deref(),
                                hit_accession.as_deref(),
                                hit_def.as_deref(),
                            ) {
                                Ok(hit) => {
                                    if check_hit_limit(hits.len()).is_some() {
                                        return Err(ParseError::TooManyHits(hits.len()));
                                    }
                                    hits.push(hit);
                                }
                                Err(reason) => {
                                    warn!(
                                        accession = hit_accession.as_deref().unwrap_or("<unknown>"),
                                        %reason,
                                        "Skipping malformed alignment segment"
                                    );
                                }
                            }
                        }
                    }
                    b"Hit" => {
                        hit_accession = None;
                        hit_def = None;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParseError::UnrecognizedFormat(e.to_string())),
        }
    }

    if !saw_structure {
        return Err(ParseError::UnrecognizedFormat(
            "no alignment elements found".to_string(),
        ));
    }

    Ok(ParsedDocument {
        hits,
        total_records,
    })
}

fn assign_field(
    tag: &[u8],
    value: &str,
    query_def: &mut Option<String>,
    hit_accession: &mut Option<String>,
    hit_def: &mut Option<String>,
    segment: Option<&mut SegmentBuilder>,
) {
    match tag {
        b"BlastOutput_query-def" | b"Iteration_query-def" => {
            *query_def = Some(value.to_string());
        }
        b"Hit_accession" => *hit_accession = Some(value.to_string()),
        b"Hit_def" => *hit_def = Some(value.to_string()),
        _ => {
            if let Some(builder) = segment {
                builder.set(tag, value);
            }
        }
    }
}

/// Collects the raw per-element text of one alignment segment; parsing and
/// required-field checks happen in `build`.
#[derive(Debug, Default)]
struct SegmentBuilder {
    bit_score: Option<String>,
    evalue: Option<String>,
    q_from: Option<String>,
    q_to: Option<String>,
    h_from: Option<String>,
    h_to: Option<String>,
    frame: Option<String>,
    identity: Option<String>,
    gaps: Option<String>,
    align_len: Option<String>,
    qseq: Option<String>,
    hseq: Option<String>,
    midline: Option<String>,
}

impl SegmentBuilder {
    fn set(&mut self, tag: &[u8], value: &str) {
        let slot = match tag {
            b"Hsp_bit-score" => &mut self.bit_score,
            b"Hsp_evalue" => &mut self.evalue,
            b"Hsp_query-from" => &mut self.q_from,
            b"Hsp_query-to" => &mut self.q_to,
            b"Hsp_hit-from" => &mut self.h_from,
            b"Hsp_hit-to" => &mut self.h_to,
            b"Hsp_hit-frame" => &mut self.frame,
            b"Hsp_identity" => &mut self.identity,
            b"Hsp_gaps" => &mut self.gaps,
            b"Hsp_align-len" => &mut self.align_len,
            b"Hsp_qseq" => &mut self.qseq,
            b"Hsp_hseq" => &mut self.hseq,
            b"Hsp_midline" => &mut self.midline,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn build(
        self,
        query_id: Option<&str>,
        accession: Option<&str>,
        definition: Option<&str>,
    ) -> Result<Hit, String> {
        let accession = accession.ok_or("missing Hit_accession")?;

        let identity_count: u64 = require_num(self.identity, "Hsp_identity")?;
        let align_len: u64 = require_num(self.align_len, "Hsp_align-len")?;
        let frame: i32 = require_num(self.frame, "Hsp_hit-frame")?;
        let e_value: f64 = require_num(self.evalue, "Hsp_evalue")?;
        let bit_score: f64 = require_num(self.bit_score, "Hsp_bit-score")?;
        let q_start: u64 = require_num(self.q_from, "Hsp_query-from")?;
        let q_end: u64 = require_num(self.q_to, "Hsp_query-to")?;
        let s_start: u64 = require_num(self.h_from, "Hsp_hit-from")?;
        let s_end: u64 = require_num(self.h_to, "Hsp_hit-to")?;
        let gap_opens: u64 = match self.gaps {
            Some(raw) => require_num(Some(raw), "Hsp_gaps")?,
            None => 0,
        };

        let qseq = self.qseq.ok_or("missing Hsp_qseq")?;
        let hseq = self.hseq.ok_or("missing Hsp_hseq")?;
        let midline = self.midline.ok_or("missing Hsp_midline")?;
        let alignment = AlignmentText::new(qseq, midline, hseq)
            .ok_or("aligned sequence and midline lengths differ")?;

        Ok(Hit {
            query_id: query_id.unwrap_or_default().to_string(),
            accession: accession.to_string(),
            definition: definition.map(str::to_string),
            identity_pct: None,
            identity_count: Some(identity_count),
            align_len,
            // Derived by the normalizer from the probe length
            mismatch: None,
            gap_opens,
            q_start,
            q_end,
            s_start,
            s_end,
            e_value,
            bit_score,
            frame,
            alignment: Some(alignment),
        })
    }
}

fn require_num<T: FromStr>(raw: Option<String>, tag: &str) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("missing {tag}"))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {tag}: '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(identity: &str, frame: &str, qseq: &str, midline: &str, hseq: &str) -> String {
        format!(
            "<Hsp>\
             <Hsp_bit-score>40.1</Hsp_bit-score>\
             <Hsp_evalue>0.001</Hsp_evalue>\
             <Hsp_query-from>1</Hsp_query-from>\
             <Hsp_query-to>20</Hsp_query-to>\
             <Hsp_hit-from>100</Hsp_hit-from>\
             <Hsp_hit-to>119</Hsp_hit-to>\
             <Hsp_hit-frame>{frame}</Hsp_hit-frame>\
             <Hsp_identity>{identity}</Hsp_identity>\
             <Hsp_gaps>0</Hsp_gaps>\
             <Hsp_align-len>20</Hsp_align-len>\
             <Hsp_qseq>{qseq}</Hsp_qseq>\
             <Hsp_hseq>{hseq}</Hsp_hseq>\
             <Hsp_midline>{midline}</Hsp_midline>\
             </Hsp>"
        )
    }

    fn document(hit_body: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\
             <BlastOutput>\
             <BlastOutput_query-def>probe-1</BlastOutput_query-def>\
             <BlastOutput_iterations>\
             <Iteration>\
             <Iteration_query-def>probe-1</Iteration_query-def>\
             <Iteration_hits>{hit_body}</Iteration_hits>\
             </Iteration>\
             </BlastOutput_iterations>\
             </BlastOutput>"
        )
    }

    const QSEQ: &str = "ACGTACGTACGTACGTACGT";
    const HSEQ: &str = "ACGTACGTACGTACGTACGA";

    #[test]
    fn test_parse_single_segment() {
        let midline = format!("{} ", "|".repeat(19));
        let body = format!(
            "<Hit>\
             <Hit_accession>NM_000518.5</Hit_accession>\
             <Hit_def>Homo sapiens hemoglobin subunit beta (HBB), mRNA</Hit_def>\
             <Hit_hsps>{}</Hit_hsps>\
             </Hit>",
            segment("19", "1", QSEQ, &midline, HSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();

        assert_eq!(doc.hits.len(), 1);
        assert_eq!(doc.total_records, 1);

        let hit = &doc.hits[0];
        assert_eq!(hit.query_id, "probe-1");
        assert_eq!(hit.accession, "NM_000518.5");
        assert_eq!(
            hit.definition.as_deref(),
            Some("Homo sapiens hemoglobin subunit beta (HBB), mRNA")
        );
        assert_eq!(hit.identity_count, Some(19));
        assert_eq!(hit.align_len, 20);
        assert_eq!(hit.frame, 1);
        assert!(hit.mismatch.is_none());

        let alignment = hit.alignment.as_ref().unwrap();
        assert_eq!(alignment.query.len(), 20);
        assert_eq!(alignment.midline.len(), 20);
        assert_eq!(alignment.subject.len(), 20);
        // Trailing space on the midline survives parsing
        assert!(alignment.midline.ends_with(' '));
    }

    #[test]
    fn test_missing_field_skips_segment_only() {
        let midline = "|".repeat(20);
        let broken = "<Hsp>\
             <Hsp_bit-score>40.1</Hsp_bit-score>\
             <Hsp_evalue>0.001</Hsp_evalue>\
             </Hsp>";
        let body = format!(
            "<Hit>\
             <Hit_accession>NM_000518.5</Hit_accession>\
             <Hit_def>def (HBB), mRNA</Hit_def>\
             <Hit_hsps>{broken}{}</Hit_hsps>\
             </Hit>",
            segment("20", "1", QSEQ, &midline, QSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();

        assert_eq!(doc.hits.len(), 1);
        assert_eq!(doc.total_records, 2);
    }

    #[test]
    fn test_unequal_alignment_lengths_skips_segment() {
        let short_midline = "|".repeat(10);
        let body = format!(
            "<Hit>\
             <Hit_accession>NM_000518.5</Hit_accession>\
             <Hit_hsps>{}</Hit_hsps>\
             </Hit>",
            segment("20", "1", QSEQ, &short_midline, QSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();

        assert!(doc.hits.is_empty());
        assert_eq!(doc.total_records, 1);
    }

    #[test]
    fn test_missing_accession_skips_hit_segments() {
        let midline = "|".repeat(20);
        let body = format!(
            "<Hit><Hit_hsps>{}</Hit_hsps></Hit>",
            segment("20", "1", QSEQ, &midline, QSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();

        assert!(doc.hits.is_empty());
        assert_eq!(doc.total_records, 1);
    }

    #[test]
    fn test_multiple_segments_per_hit() {
        let midline = "|".repeat(20);
        let body = format!(
            "<Hit>\
             <Hit_accession>NM_000518.5</Hit_accession>\
             <Hit_hsps>{}{}</Hit_hsps>\
             </Hit>",
            segment("20", "1", QSEQ, &midline, QSEQ),
            segment("18", "-1", QSEQ, &midline, QSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();

        assert_eq!(doc.hits.len(), 2);
        assert_eq!(doc.hits[0].frame, 1);
        assert_eq!(doc.hits[1].frame, -1);
    }

    #[test]
    fn test_entity_unescaped_in_definition() {
        let midline = "|".repeat(20);
        let body = format!(
            "<Hit>\
             <Hit_accession>NM_000518.5</Hit_accession>\
             <Hit_def>alpha &amp; beta (HBB), mRNA</Hit_def>\
             <Hit_hsps>{}</Hit_hsps>\
             </Hit>",
            segment("20", "1", QSEQ, &midline, QSEQ)
        );
        let doc = parse_xml_text(&document(&body)).unwrap();
        assert_eq!(
            doc.hits[0].definition.as_deref(),
            Some("alpha & beta (HBB), mRNA")
        );
    }

    #[test]
    fn test_not_xml_is_unrecognized() {
        let err = parse_xml_text("probe-1\tNM_000518.5\t95.0\n").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedFormat(_)));
    }

    #[test]
    fn test_foreign_xml_is_unrecognized() {
        let err = parse_xml_text("<html><body>hello</body></html>").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedFormat(_)));
    }
}
