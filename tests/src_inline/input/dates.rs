use super::*;

use chrono::{NaiveDate, Timelike};

#[test]
fn test_iso_datetime() {
    let dt = parse_invoice_date("2024-02-01 14:30:00").unwrap();
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(dt.hour(), 14);
}

#[test]
fn test_iso_datetime_no_seconds() {
    assert!(parse_invoice_date("2024-02-01 14:30").is_some());
}

#[test]
fn test_iso_t_separator() {
    assert!(parse_invoice_date("2024-02-01T14:30:00").is_some());
}

#[test]
fn test_us_datetime() {
    let dt = parse_invoice_date("12/1/2010 8:26").unwrap();
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2010, 12, 1).unwrap());
    assert_eq!(dt.minute(), 26);
}

#[test]
fn test_bare_date_reads_as_midnight() {
    let dt = parse_invoice_date("2024-02-01").unwrap();
    assert_eq!(dt.hour(), 0);
    assert_eq!(dt.minute(), 0);
}

#[test]
fn test_us_bare_date() {
    assert!(parse_invoice_date("12/01/2010").is_some());
}

#[test]
fn test_garbage_rejected() {
    assert!(parse_invoice_date("not a date").is_none());
    assert!(parse_invoice_date("").is_none());
    assert!(parse_invoice_date("2024-13-01 00:00:00").is_none());
}
