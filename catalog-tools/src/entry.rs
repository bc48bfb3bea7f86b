use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Year value reserved for bootstrap entries that are never rendered or kept.
pub const PLACEHOLDER_YEAR: i64 = 0;

/// Number of URL characters shown on a card before the ellipsis.
pub const URL_DISPLAY_CHARS: usize = 50;

/// One captured phishing page as stored in `index.json`.
///
/// Only `year` is mandatory. The text fields keep the raw JSON value so that
/// a record the tools did not write (explicit `null`s, a number where a
/// string belongs) loads and is saved back unchanged. `None` means the key
/// was absent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogEntry {
    pub year: i64,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub domain: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub filename: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(
        rename = "capturedAt",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub captured_at: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    /// Keys this tool does not know about, carried through rewrites untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// A key that is present, even as `null`, is kept as `Some`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text view of a stored field. Absent and `null` both read as missing;
/// numbers and other non-string values are shown as their JSON text.
pub fn field_text(value: &Option<Value>) -> Option<Cow<'_, str>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
        Some(other) => Some(Cow::Owned(other.to_string())),
    }
}

impl CatalogEntry {
    pub fn is_placeholder(&self) -> bool {
        self.year == PLACEHOLDER_YEAR
    }

    pub fn url_or_default(&self) -> Cow<'_, str> {
        field_text(&self.url).unwrap_or(Cow::Borrowed("#"))
    }

    pub fn domain_or_default(&self) -> Cow<'_, str> {
        field_text(&self.domain).unwrap_or(Cow::Borrowed("Unknown domain"))
    }

    pub fn filename_or_default(&self) -> Cow<'_, str> {
        field_text(&self.filename).unwrap_or(Cow::Borrowed("unknown"))
    }

    pub fn description_or_default(&self) -> Cow<'_, str> {
        field_text(&self.description).unwrap_or(Cow::Borrowed("No description available"))
    }

    pub fn captured_at_or_default(&self) -> Cow<'_, str> {
        field_text(&self.captured_at).unwrap_or(Cow::Borrowed(""))
    }

    /// Card heading derived from the capture slug, e.g. `paypal-login-page`
    /// becomes `Paypal Login Page`.
    pub fn title(&self) -> String {
        title_case(&self.filename_or_default().replace('-', " "))
    }

    pub fn truncated_url(&self) -> String {
        truncate_url(&self.url_or_default())
    }

    /// Link target for the archived page. An explicit `path`, even an empty
    /// one, wins over the derived `{year}/{filename}/index.html`.
    pub fn display_path(&self) -> String {
        match field_text(&self.path) {
            Some(path) => path.into_owned(),
            None => archive_path(self.year, &self.filename_or_default()),
        }
    }
}

pub fn archive_path(year: i64, filename: &str) -> String {
    format!("{}/{}/index.html", year, filename)
}

/// Drops placeholder entries, keeping the order of the rest.
pub fn filter_placeholders(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter(|entry| !entry.is_placeholder())
        .collect()
}

/// Capitalizes every whitespace separated word: first character upper case,
/// the remainder lower case. Runs of whitespace collapse to a single space.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Shortens a URL to its first [`URL_DISPLAY_CHARS`] characters plus `...`.
pub fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(URL_DISPLAY_CHARS) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}
