use chrono::{TimeZone, Utc};

use crate::date::{format_captured_at, parse_captured_at, FormatError, UNKNOWN_DATE};

#[test]
fn test_format_utc_timestamp() {
    assert_eq!(
        format_captured_at("2024-01-15T10:30:00Z"),
        "January 15, 2024 at 10:30 UTC"
    );
}

#[test]
fn test_format_empty_timestamp() {
    assert_eq!(format_captured_at(""), UNKNOWN_DATE);
    assert_eq!(format_captured_at(""), "Unknown date");
}

#[test]
fn test_format_unparseable_timestamp_is_unchanged() {
    assert_eq!(format_captured_at("not-a-date"), "not-a-date");
    assert_eq!(format_captured_at("2024-13-45T99:00:00Z"), "2024-13-45T99:00:00Z");
}

#[test]
fn test_format_pads_single_digit_day() {
    assert_eq!(
        format_captured_at("2024-03-05T07:08:09Z"),
        "March 05, 2024 at 07:08 UTC"
    );
}

#[test]
fn test_offset_is_converted_to_utc() {
    assert_eq!(
        format_captured_at("2024-01-15T12:30:00+02:00"),
        "January 15, 2024 at 10:30 UTC"
    );
}

#[test]
fn test_naive_and_date_only_inputs() {
    assert_eq!(
        format_captured_at("2024-03-05T07:08:09.123456"),
        "March 05, 2024 at 07:08 UTC"
    );
    assert_eq!(
        format_captured_at("2024-03-05 07:08"),
        "March 05, 2024 at 07:08 UTC"
    );
    assert_eq!(
        format_captured_at("2024-03-05"),
        "March 05, 2024 at 00:00 UTC"
    );
}

#[test]
fn test_parse_reports_raw_value() {
    assert_eq!(
        parse_captured_at("yesterday"),
        Err(FormatError {
            raw: "yesterday".to_string()
        })
    );
    assert_eq!(
        parse_captured_at("2023-11-02T08:15:00.500Z").unwrap(),
        Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 0).unwrap() + chrono::Duration::milliseconds(500)
    );
}

#[test]
fn test_compact_iso_forms() {
    assert_eq!(
        format_captured_at("20240115T103000Z"),
        "January 15, 2024 at 10:30 UTC"
    );
    assert_eq!(
        format_captured_at("20240115T1230+0200"),
        "January 15, 2024 at 10:30 UTC"
    );
    assert_eq!(
        format_captured_at("2024-01-15T10"),
        "January 15, 2024 at 10:00 UTC"
    );
    assert_eq!(format_captured_at("2024011T1030"), "2024011T1030");
}
