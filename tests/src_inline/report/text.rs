use super::*;

use crate::report::{MetricStats, SegmentStat, SummaryData};

fn summary() -> SummaryData {
    SummaryData {
        tool_name: "rfm-segment".to_string(),
        tool_version: "0.1.0".to_string(),
        n_line_items: 100,
        n_customers: 10,
        n_unscored: 1,
        metrics: vec![MetricStats {
            name: "recency",
            median: 30.0,
            p90: 200.0,
            p99: 370.0,
        }],
        segments: vec![SegmentStat {
            name: "champions",
            count: 3,
            fraction: 0.3,
        }],
    }
}

#[test]
fn test_report_mentions_counts_and_segments() {
    let text = render_report_text(&summary());
    assert!(text.contains("rfm-segment v0.1.0"));
    assert!(text.contains("line items : 100"));
    assert!(text.contains("customers  : 10"));
    assert!(text.contains("champions"));
    assert!(text.contains("30.00%"));
}

#[test]
fn test_report_lists_metric_quantiles() {
    let text = render_report_text(&summary());
    assert!(text.contains("recency"));
    assert!(text.contains("30.00 / 200.00 / 370.00"));
}
