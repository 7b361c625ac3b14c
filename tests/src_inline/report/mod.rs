use super::*;

use crate::model::records::{CustomerRfm, ScoredCustomer};
use crate::model::segments::Segment;

fn labeled(customer: &str, segment: Option<Segment>) -> LabeledCustomer {
    LabeledCustomer {
        scored: ScoredCustomer {
            rfm: CustomerRfm {
                customer_id: customer.to_string(),
                recency: 10,
                frequency: 2,
                monetary: 100.0,
            },
            recency_score: Some(5),
            frequency_score: Some(1),
            monetary_score: Some(1),
            rfm_score: Some("11".to_string()),
        },
        segment,
    }
}

#[test]
fn test_quantiles() {
    let v = vec![1.0f64, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(p99(&v), 5.0);
}

#[test]
fn test_quantiles_empty() {
    assert_eq!(median(&[]), 0.0);
    assert_eq!(quantile_indexed(&[], 0.9), 0.0);
}

#[test]
fn test_build_summary_counts() {
    let rows = vec![
        labeled("1", Some(Segment::Hibernating)),
        labeled("2", Some(Segment::Hibernating)),
        labeled("3", Some(Segment::Champions)),
        labeled("4", None),
    ];
    let summary = build_summary(40, &rows);
    assert_eq!(summary.n_line_items, 40);
    assert_eq!(summary.n_customers, 4);
    assert_eq!(summary.n_unscored, 1);

    let hibernating = summary
        .segments
        .iter()
        .find(|s| s.name == "hibernating")
        .unwrap();
    assert_eq!(hibernating.count, 2);
    assert_eq!(hibernating.fraction, 0.5);
}

#[test]
fn test_build_summary_empty_table() {
    let summary = build_summary(0, &[]);
    assert_eq!(summary.n_customers, 0);
    assert!(summary.segments.iter().all(|s| s.fraction == 0.0));
}

#[test]
fn test_write_reports_creates_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let rows = vec![labeled("1", Some(Segment::Hibernating))];
    let summary = build_summary(1, &rows);

    write_reports(&rows, &summary, &out).unwrap();

    let csv = std::fs::read_to_string(out.join("segments.csv")).unwrap();
    assert!(csv.starts_with("CustomerID,"));
    assert!(csv.contains("hibernating"));

    let json = std::fs::read_to_string(out.join("summary.json")).unwrap();
    assert!(json.contains("\"n_customers\": 1"));

    assert!(out.join("report.txt").exists());
}
