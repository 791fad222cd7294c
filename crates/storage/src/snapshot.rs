//! Snapshot files: whole-store persistence
//!
//! A snapshot is the pretty-printed JSON form of [`StoreSnapshot`], one file
//! per database. Writes use write-fsync-rename:
//!
//! 1. Write to `<name>.json.tmp`
//! 2. fsync the temporary file
//! 3. Atomic rename to the final path
//! 4. fsync the parent directory
//!
//! A crash therefore leaves either the previous snapshot or the new one,
//! never a torn file. A stale `.tmp` left by a crash is ignored on read and
//! overwritten by the next write.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use qatrack_core::{Error, Result, StoreSnapshot};
use tracing::debug;

/// Temporary path used while a snapshot is being written
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Persist `snapshot` to `path` atomically
///
/// Writers to the same `path` share one temporary file and must be
/// serialized by the caller.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails.
pub fn write_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    let tmp = temp_path(path);

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(&tmp, path)?;

    if let Some(parent) = path.parent() {
        if parent.exists() && !parent.as_os_str().is_empty() {
            File::open(parent)?.sync_all()?;
        }
    }

    debug!(
        target: "qatrack::storage",
        path = ?path,
        documents = snapshot.document_count(),
        bytes = bytes.len(),
        "Snapshot written"
    );
    Ok(())
}

/// Load the snapshot at `path`
///
/// Returns `Ok(None)` if no snapshot exists yet.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file exists but is not a valid snapshot.
pub fn read_snapshot(path: &Path) -> Result<Option<StoreSnapshot>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let snapshot: StoreSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
        Error::storage(format!("corrupt snapshot {}: {}", path.display(), e))
    })?;
    debug!(
        target: "qatrack::storage",
        path = ?path,
        documents = snapshot.document_count(),
        "Snapshot loaded"
    );
    Ok(Some(snapshot))
}
