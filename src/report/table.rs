//! Display-table rendering.

use crate::core::row::ScreenReport;

/// Message rendered when filtering left nothing to report.
/// A valid outcome, never an error.
pub const NO_HITS_MESSAGE: &str = "No hits found.";

/// Render the report as the fixed five-column display table.
///
/// Column order and names are part of the external contract:
/// Index, Name, Accession, Mismatch, Alignment. The Alignment cell is the
/// three-line stacked block, its continuation lines indented under the
/// Alignment column.
#[must_use]
pub fn render_text(report: &ScreenReport) -> String {
    if report.rows.is_empty() {
        return format!("{NO_HITS_MESSAGE}\n");
    }

    let headers = ["Index", "Name", "Accession", "Mismatch"];
    let mut widths = [
        headers[0].len(),
        headers[1].len(),
        headers[2].len(),
        headers[3].len(),
    ];
    for row in &report.rows {
        widths[0] = widths[0].max(row.index.to_string().len());
        widths[1] = widths[1].max(row.display_name().len());
        widths[2] = widths[2].max(row.accession.len());
        widths[3] = widths[3].max(row.mismatch.to_string().len());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  Alignment\n",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    ));

    // Continuation lines sit under the Alignment column
    let indent = " ".repeat(widths[0] + widths[1] + widths[2] + widths[3] + 8);

    for row in &report.rows {
        let mut lines = row
            .alignment
            .as_ref()
            .map(|block| vec![block.query.clone(), block.midline.clone(), block.subject.clone()])
            .unwrap_or_default()
            .into_iter();

        out.push_str(&format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {}\n",
            row.index,
            row.display_name(),
            row.accession,
            row.mismatch,
            lines.next().unwrap_or_default(),
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        ));
        for line in lines {
            out.push_str(&indent);
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}
