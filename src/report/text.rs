use std::fmt::Write;

use crate::report::SummaryData;

/// Renders the human-readable run summary.
pub fn render_report_text(summary: &SummaryData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} v{}", summary.tool_name, summary.tool_version);
    let _ = writeln!(out, "====================");
    let _ = writeln!(out, "line items : {}", summary.n_line_items);
    let _ = writeln!(out, "customers  : {}", summary.n_customers);
    let _ = writeln!(out, "unscored   : {}", summary.n_unscored);
    let _ = writeln!(out);

    let _ = writeln!(out, "metrics (median / p90 / p99)");
    for metric in &summary.metrics {
        let _ = writeln!(
            out,
            "  {:<10} {:.2} / {:.2} / {:.2}",
            metric.name, metric.median, metric.p90, metric.p99
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "segments");
    for segment in &summary.segments {
        let _ = writeln!(
            out,
            "  {:<20} {:>6}  {:>6.2}%",
            segment.name,
            segment.count,
            segment.fraction * 100.0
        );
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
