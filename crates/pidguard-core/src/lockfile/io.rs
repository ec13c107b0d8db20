//! Atomic PID file I/O operations.
//!
//! Format: the decimal PID and nothing else, no trailing newline.
//! ```text
//! 12345
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

use crate::error::{LockFileError, LockFileResult};

/// Read and parse the PID stored at `path`.
///
/// Content is parsed exactly as stored: surrounding whitespace is an error.
pub(super) fn read_pid(path: &Path) -> LockFileResult<u32> {
    let bytes = fs::read(path).map_err(|e| LockFileError::io("read", path, e))?;
    parse_pid(path, &bytes)
}

fn parse_pid(path: &Path, bytes: &[u8]) -> LockFileResult<u32> {
    let content = String::from_utf8_lossy(bytes);
    content
        .parse::<u32>()
        .map_err(|source| LockFileError::InvalidContent {
            path: path.to_path_buf(),
            content: content.into_owned(),
            source,
        })
}

/// Write `pid` to `path` atomically using temp file + rename.
///
/// # Atomicity
/// 1. Write to a hidden temp file in the same directory as `path`
/// 2. `fsync` the temp file
/// 3. Rename over `path` (atomic within one filesystem)
///
/// Readers see either the old file or the complete new one. The temp file is
/// deleted on every failure path when its handle is dropped.
pub(super) fn write_pid(path: &Path, pid: u32) -> LockFileResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = Builder::new()
        .prefix(".pidguard-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| LockFileError::io("create temporary file for", path, e))?;

    // Keep the mode of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| LockFileError::io("copy permissions for", path, e))?;
    }

    temp.write_all(pid.to_string().as_bytes())
        .map_err(|e| LockFileError::io("write", path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| LockFileError::io("sync", path, e))?;

    // On failure the PersistError still owns the temp file and removes it on drop
    temp.persist(path)
        .map_err(|e| LockFileError::io("replace", path, e.error))?;

    Ok(())
}

/// Delete the PID file (idempotent - no error if missing).
pub(super) fn remove(path: &Path) -> LockFileResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LockFileError::io("remove", path, e)),
    }
}
