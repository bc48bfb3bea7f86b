use std::borrow::Cow;

use log::warn;
use serde_json::Value;

use crate::entry::{archive_path, filter_placeholders, CatalogEntry};

/// A freshly captured page, as reported by the capture workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCapture {
    pub year: i64,
    pub url: String,
    pub domain: String,
    pub filename: String,
    pub captured_at: String,
}

impl NewCapture {
    pub fn description(&self) -> String {
        format!("Phishing page captured from {}", self.domain)
    }

    pub fn into_entry(self) -> CatalogEntry {
        CatalogEntry {
            description: Some(Value::String(self.description())),
            path: Some(Value::String(archive_path(self.year, &self.filename))),
            year: self.year,
            url: Some(Value::String(self.url)),
            domain: Some(Value::String(self.domain)),
            filename: Some(Value::String(self.filename)),
            captured_at: Some(Value::String(self.captured_at)),
            extra: Default::default(),
        }
    }
}

/// Orders entries by `(year, capturedAt)` descending. The sort is stable, so
/// entries that tie on both keys keep their relative order.
pub fn sort_newest_first(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

fn sort_key(entry: &CatalogEntry) -> (i64, Cow<'_, str>) {
    (entry.year, entry.captured_at_or_default())
}

/// Appends one capture to an index, dropping placeholders and restoring the
/// newest-first order. A capture that is itself a placeholder is not kept.
pub fn apply_capture(entries: Vec<CatalogEntry>, capture: NewCapture) -> Vec<CatalogEntry> {
    let mut entries = entries;
    let entry = capture.into_entry();
    if entry.is_placeholder() {
        warn!(
            "Capture {} has the placeholder year and will not be stored",
            entry.filename_or_default()
        );
    }
    entries.push(entry);

    let mut entries = filter_placeholders(entries);
    sort_newest_first(&mut entries);
    entries
}
