use std::borrow::Cow;
use std::io::{self, Write};

use crate::model::records::LabeledCustomer;

/// Output columns, in the order they are appended by the pipeline stages.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "CustomerID",
    "recency",
    "frequency",
    "monetary",
    "recency_score",
    "frequency_score",
    "monetary_score",
    "RFM_SCORE",
    "segment",
];

/// Serializes the labeled table. Monetary is written with two decimals;
/// undefined scores, keys, and segments serialize as empty fields. An empty
/// table yields a header-only document.
pub fn write_segments_csv<W: Write>(rows: &[LabeledCustomer], w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", OUTPUT_COLUMNS.join(","))?;
    for row in rows {
        let rfm = &row.scored.rfm;
        writeln!(
            w,
            "{},{},{},{:.2},{},{},{},{},{}",
            escape_field(&rfm.customer_id),
            rfm.recency,
            rfm.frequency,
            rfm.monetary,
            score_field(row.scored.recency_score),
            score_field(row.scored.frequency_score),
            score_field(row.scored.monetary_score),
            row.scored.rfm_score.as_deref().unwrap_or(""),
            row.segment.map(|s| s.name()).unwrap_or(""),
        )?;
    }
    Ok(())
}

/// Renders the table to a byte buffer, for response bodies.
pub fn render_segments_csv(rows: &[LabeledCustomer]) -> Vec<u8> {
    let mut out = Vec::new();
    // writing to a Vec cannot fail
    let _ = write_segments_csv(rows, &mut out);
    out
}

fn score_field(score: Option<u8>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/csv.rs"]
mod tests;
