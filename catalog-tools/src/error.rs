use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures that abort a catalog run.
///
/// Date parsing problems are not represented here: the renderer recovers
/// from them per entry, see [`crate::date::FormatError`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog index {}: {source}", .path.display())]
    ReadIndex { path: PathBuf, source: io::Error },

    #[error("catalog index {} is not valid JSON: {source}", .path.display())]
    ParseIndex {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog index: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("workflow dispatch request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogError {
    /// True for the missing/malformed index cases.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CatalogError::ReadIndex { .. } | CatalogError::ParseIndex { .. }
        )
    }
}
