use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use thiserror::Error;

/// How capture times appear on the catalog page.
pub const DISPLAY_FORMAT: &str = "%B %d, %Y at %H:%M UTC";

pub const UNKNOWN_DATE: &str = "Unknown date";

// Tried after `Z` has been rewritten to `+00:00`
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

// No offset given, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized capture timestamp: {raw:?}")]
pub struct FormatError {
    pub raw: String,
}

/// Parses an ISO-8601 capture timestamp into UTC.
pub fn parse_captured_at(raw: &str) -> Result<DateTime<Utc>, FormatError> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    parse_extended(&normalized)
        .or_else(|| expand_compact(&normalized).and_then(|expanded| parse_extended(&expanded)))
        .ok_or_else(|| FormatError {
            raw: raw.to_string(),
        })
}

fn parse_extended(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Rewrites the basic and reduced ISO-8601 forms (`20240115T103000`,
/// `2024-01-15T10`) into the extended form the format strings expect.
/// Whatever follows the clock digits (fraction, offset) is kept as-is.
fn expand_compact(s: &str) -> Option<String> {
    let (date, rest) = s.split_once('T')?;
    let date = match date.len() {
        8 if date.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
        }
        10 => date.to_string(),
        _ => return None,
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (clock, tail) = rest.split_at(digits);
    if tail.starts_with(':') {
        return None;
    }
    let clock = match digits {
        2 => format!("{}:00", clock),
        4 => format!("{}:{}", &clock[..2], &clock[2..]),
        6 => format!("{}:{}:{}", &clock[..2], &clock[2..4], &clock[4..]),
        _ => return None,
    };

    Some(format!("{}T{}{}", date, clock, tail))
}

/// Renders a capture timestamp for display. Never fails: an empty value
/// becomes [`UNKNOWN_DATE`] and anything unparseable is shown verbatim.
pub fn format_captured_at(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    match parse_captured_at(raw) {
        Ok(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        Err(e) => {
            debug!("{}, showing it as-is", e);
            raw.to_string()
        }
    }
}
