//! Flat JSON files holding the site's records.
//!
//! Collections (`publications.json`, `data/news.json`) are top-level JSON
//! arrays; the scholar profile is a single object. Writes go to a temporary
//! file in the target directory which then replaces the original, so a
//! crash mid-write never leaves a truncated store behind.

mod error;

pub use error::StoreError;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Reads a JSON array of records.
///
/// # Errors
/// [`StoreError::Io`] when the file cannot be read, [`StoreError::Json`] when
/// it is not a JSON array of `T`.
#[instrument(fields(path = %path.display()))]
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let records: Vec<T> = load_document(path)?;
    debug!(count = records.len(), "Loaded records");
    Ok(records)
}

/// Like [`load_records`], but a missing file is an empty collection.
///
/// # Errors
/// Any failure other than a missing file.
pub fn load_records_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    match load_records(path) {
        Err(err) if err.is_not_found() => {
            debug!(path = %path.display(), "Store does not exist yet, starting empty");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Reads a single JSON document.
///
/// # Errors
/// [`StoreError::Io`] or [`StoreError::Json`].
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-prints `value` and atomically replaces `path` with it.
///
/// # Errors
/// [`StoreError`] when serialization, the temporary write or the rename fails.
#[instrument(skip(value), fields(path = %path.display()))]
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)?;
    debug!(bytes = bytes.len(), "Saved JSON store");
    Ok(())
}

/// Replaces `path` with `contents` via a temporary file in the same directory.
///
/// # Errors
/// [`StoreError::Io`] or [`StoreError::Persist`].
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(contents).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
