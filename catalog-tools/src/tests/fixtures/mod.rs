use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::CatalogEntry;

/// Load a test index fixture by name
pub fn load_json_fixture(fixture_name: &str) -> String {
    let path = fixture_path(fixture_name);
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a fixture and parse it into entries
pub fn load_entries(fixture_name: &str) -> Vec<CatalogEntry> {
    serde_json::from_str(&load_json_fixture(fixture_name))
        .unwrap_or_else(|e| panic!("Fixture {} is not a valid index: {}", fixture_name, e))
}

/// Copy a fixture into `dir` as `index.json` so tests can rewrite it
pub fn copy_fixture_to(dir: &Path, fixture_name: &str) -> PathBuf {
    let target = dir.join("index.json");
    fs::copy(fixture_path(fixture_name), &target)
        .unwrap_or_else(|_| panic!("Failed to copy test fixture: {}", fixture_name));
    target
}

fn fixture_path(fixture_name: &str) -> PathBuf {
    Path::new("src/tests/fixtures").join(format!("{}.json", fixture_name))
}
