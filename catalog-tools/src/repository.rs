use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::entry::CatalogEntry;
use crate::error::{CatalogError, Result};
use crate::update::{apply_capture, NewCapture};

/// Storage for the catalog index.
///
/// There is no locking: two writers appending at the same time can lose one
/// of the updates.
pub trait CatalogRepository {
    fn load(&self) -> Result<Vec<CatalogEntry>>;

    fn save(&mut self, entries: &[CatalogEntry]) -> Result<()>;

    /// Loads the index, adds `capture` and persists the result, which is
    /// also returned.
    fn append(&mut self, capture: NewCapture) -> Result<Vec<CatalogEntry>> {
        let entries = apply_capture(self.load()?, capture);
        self.save(&entries)?;
        Ok(entries)
    }
}

/// The `index.json` file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        let json = fs::read_to_string(&self.path).map_err(|source| CatalogError::ReadIndex {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| CatalogError::ParseIndex {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, entries: &[CatalogEntry]) -> Result<()> {
        let json = to_pretty_json(entries)?;
        write_atomically(&self.path, &json)?;
        info!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the index in memory. Useful for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: Vec<CatalogEntry>,
    saves: usize,
}

impl InMemoryRepository {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CatalogRepository for InMemoryRepository {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[CatalogEntry]) -> Result<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Serializes the index with four space indentation and a trailing newline.
pub fn to_pretty_json(entries: &[CatalogEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(CatalogError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Replaces `path` with `contents` via a temp file in the same directory, so
/// a crash never leaves a truncated file behind.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Replace the file a symlink points at, not the link itself
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temp files are created 0600; keep whatever the old file had instead
    match fs::metadata(&target) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?,
        Err(_) => set_default_permissions(tmp.as_file()).map_err(write_err)?,
    }

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
