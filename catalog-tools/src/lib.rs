// Catalog model, storage and page generation
pub mod date;
pub mod entry;
pub mod error;
pub mod render;
pub mod repository;
pub mod screenshot;
pub mod trigger;
pub mod update;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::date::{format_captured_at, parse_captured_at, FormatError};
pub use crate::entry::{filter_placeholders, CatalogEntry};
pub use crate::error::{CatalogError, Result};
pub use crate::render::{generate_catalog, write_page, CatalogPage, CatalogStats};
pub use crate::repository::{CatalogRepository, InMemoryRepository, JsonFileRepository};
pub use crate::screenshot::ensure_scheme;
pub use crate::trigger::{trigger_capture, trigger_capture_with, TriggerConfig, WorkflowDispatch};
pub use crate::update::{apply_capture, sort_newest_first, NewCapture};
