use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::records::LabeledCustomer;
use crate::model::segments::segment_order;

pub mod csv;
pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct MetricStats {
    pub name: &'static str,
    pub median: f64,
    pub p90: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub n_line_items: usize,
    pub n_customers: usize,
    pub n_unscored: usize,
    pub metrics: Vec<MetricStats>,
    pub segments: Vec<SegmentStat>,
}

pub fn build_summary(n_line_items: usize, rows: &[LabeledCustomer]) -> SummaryData {
    let recency: Vec<f64> = rows.iter().map(|r| r.scored.rfm.recency as f64).collect();
    let frequency: Vec<f64> = rows.iter().map(|r| r.scored.rfm.frequency as f64).collect();
    let monetary: Vec<f64> = rows.iter().map(|r| r.scored.rfm.monetary).collect();

    let metrics = [("recency", recency), ("frequency", frequency), ("monetary", monetary)]
        .into_iter()
        .map(|(name, values)| MetricStats {
            name,
            median: median(&values),
            p90: p90(&values),
            p99: p99(&values),
        })
        .collect();

    let segments = segment_order()
        .iter()
        .map(|segment| {
            let count = rows.iter().filter(|r| r.segment == Some(*segment)).count();
            SegmentStat {
                name: segment.name(),
                count,
                fraction: if rows.is_empty() {
                    0.0
                } else {
                    count as f64 / rows.len() as f64
                },
            }
        })
        .collect();

    SummaryData {
        tool_name: "rfm-segment".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        n_line_items,
        n_customers: rows.len(),
        n_unscored: rows.iter().filter(|r| r.segment.is_none()).count(),
        metrics,
        segments,
    }
}

/// Writes segments.csv, summary.json, and report.txt into the output
/// directory, creating it if needed.
pub fn write_reports(
    rows: &[LabeledCustomer],
    summary: &SummaryData,
    out_dir: &Path,
) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let mut w = BufWriter::new(File::create(out_dir.join("segments.csv"))?);
    csv::write_segments_csv(rows, &mut w)?;
    w.flush()?;

    let rendered = json::render_summary_json(summary).map_err(io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &rendered)?;
    write_text(&out_dir.join("report.txt"), &text::render_report_text(summary))?;
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn p99(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.99)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
