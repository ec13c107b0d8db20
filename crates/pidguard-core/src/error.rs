//! Error types for PID file and process signalling operations.
//!
//! Expected protocol outcomes (another owner holds the lock, the recorded
//! process is gone) get their own variants so callers can branch on them.
//! Filesystem failures are passed through with the path attached.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for [`LockFile`](crate::LockFile) operations.
pub type LockFileResult<T> = Result<T, LockFileError>;

/// Errors returned by [`LockFile`](crate::LockFile) operations.
#[derive(Debug, Error)]
pub enum LockFileError {
    /// The lock file has no path. Never touches the filesystem.
    #[error("empty lock file path (no path given)")]
    EmptyPath,

    /// Reading, writing or deleting the PID file failed.
    #[error("failed to {action} PID file {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but its content is not a process ID.
    #[error("PID file {} does not contain a valid PID: {content:?}", .path.display())]
    InvalidContent {
        path: PathBuf,
        content: String,
        #[source]
        source: ParseIntError,
    },

    /// The recorded process is not running.
    #[error("process {pid} does not exist")]
    ProcessNotFound { pid: u32 },

    /// The recorded process is running a different program than the caller.
    #[error(
        "process {pid} is likely not running the same executable (found {}, expected {})",
        .actual.as_deref().unwrap_or("<unknown>"),
        .expected.as_deref().unwrap_or("<unknown>")
    )]
    ExecutableMismatch {
        pid: u32,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// Another live instance of the same program owns the PID file.
    #[error("PID file {} is in use by another process ({pid})", .path.display())]
    AlreadyLocked { pid: u32, path: PathBuf },

    /// Refused to delete a PID file owned by another running process.
    #[error("refusing to remove PID file {} written by another running process ({pid})", .path.display())]
    OwnershipConflict { pid: u32, path: PathBuf },

    /// Refused to delete a PID file that cannot be shown to belong to the caller.
    #[error("PID file {} content invalid", .path.display())]
    InvalidOwner {
        path: PathBuf,
        #[source]
        source: Box<LockFileError>,
    },
}

impl LockFileError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// True when the PID file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// True when another live instance holds the lock.
    pub const fn is_already_locked(&self) -> bool {
        matches!(self, Self::AlreadyLocked { .. })
    }

    /// True when the file exists but does not hold a parseable PID.
    pub const fn is_invalid_content(&self) -> bool {
        matches!(self, Self::InvalidContent { .. })
    }
}

/// Errors returned when delivering a signal to another process.
#[derive(Debug, Error)]
pub enum SignalError {
    /// No process with this PID exists. Usually safe to ignore.
    #[error("no such process: {pid}")]
    NotFound { pid: u32 },

    /// The process exists but the caller may not signal it.
    #[error("permission denied signalling process {pid}")]
    PermissionDenied { pid: u32 },

    /// The PID cannot address a single process on this platform.
    #[error("invalid process ID: {pid}")]
    InvalidPid { pid: u32 },

    /// The platform call failed for another reason.
    #[error("failed to signal process {pid}")]
    Os {
        pid: u32,
        #[source]
        source: io::Error,
    },
}

impl SignalError {
    /// True when the target process does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[cfg(any(windows, test))]
    pub(crate) fn from_io(pid: u32, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { pid },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { pid },
            _ => Self::Os { pid, source },
        }
    }
}
