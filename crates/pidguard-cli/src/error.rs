//! CLI-specific error types and exit code mapping.
//!
//! Exit codes follow sysexits.h where a category fits:
//! - 0: Success
//! - 1: General error
//! - 3: No running instance (LSB "program is not running")
//! - 64: Invalid usage (e.g. empty PID file path)
//! - 71: OS error (signal delivery, signal handler setup)
//! - 74: I/O error on the PID file
//! - 75: Temporary failure (another instance is running)
//! - 77: Permission denied

use std::path::PathBuf;

use pidguard_core::{LockFileError, SignalError};
use thiserror::Error;

/// Conditions the CLI reports with a dedicated exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Another instance owns the PID file.
    #[error("Instance is already running (PID {pid}, PID file: {})", .path.display())]
    AlreadyRunning { pid: u32, path: PathBuf },

    /// The PID file does not name a running instance.
    #[error("No running instance found in {}", .path.display())]
    NotRunning { path: PathBuf },

    /// Refused to clean up a PID file that a running instance owns.
    #[error("Instance with PID {pid} is still running; stop it first or use --force")]
    StillRunning { pid: u32 },

    /// Installing or awaiting the shutdown signal handler failed.
    #[error("Failed to listen for shutdown signal")]
    Shutdown(#[source] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::AlreadyRunning { .. } | Self::StillRunning { .. } => 75, // EX_TEMPFAIL
            Self::NotRunning { .. } => 3,
            Self::Shutdown(_) => 71, // EX_OSERR
        }
    }
}

const fn lock_exit_code(err: &LockFileError) -> u8 {
    match err {
        LockFileError::EmptyPath => 64, // EX_USAGE
        LockFileError::Io { .. } => 74, // EX_IOERR
        LockFileError::AlreadyLocked { .. } => 75,
        _ => 1,
    }
}

const fn signal_exit_code(err: &SignalError) -> u8 {
    match err {
        SignalError::PermissionDenied { .. } => 77, // EX_NOPERM
        SignalError::InvalidPid { .. } => 64,
        SignalError::NotFound { .. } => 1,
        SignalError::Os { .. } => 71,
    }
}

/// Pick the exit code for an error returned by a handler.
///
/// Looks through `anyhow` context layers for the first typed error it knows.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<CliError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<LockFileError>() {
        return lock_exit_code(e);
    }
    if let Some(e) = err.downcast_ref::<SignalError>() {
        return signal_exit_code(e);
    }
    1
}
