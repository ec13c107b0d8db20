//! Owner verification for PID files.
//!
//! The recorded PID is trusted only when a process with that PID is alive
//! and runs an executable with the same name as the caller. Comparing names
//! narrows, but cannot close, the window where a dead owner's PID has been
//! reused by an unrelated program.

use std::fmt;

use crate::error::LockFileError;
use crate::process::ProcessSignal;

/// Whether a live owner runs the same program as the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableMatch {
    Same,
    Different,
}

/// Who currently owns a PID file, derived on each read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// No file at the path.
    NoFile,
    /// The file exists but does not contain a PID.
    Invalid,
    /// The recorded process is no longer running.
    StaleOwner { pid: u32 },
    /// The recorded process is running.
    LiveOwner {
        pid: u32,
        executable: ExecutableMatch,
    },
}

impl Ownership {
    /// PID recorded in the file, if it could be parsed.
    pub const fn pid(&self) -> Option<u32> {
        match self {
            Self::NoFile | Self::Invalid => None,
            Self::StaleOwner { pid } | Self::LiveOwner { pid, .. } => Some(*pid),
        }
    }

    /// True when the file names a running instance of the caller's program.
    pub const fn is_valid(&self) -> bool {
        matches!(
            self,
            Self::LiveOwner {
                executable: ExecutableMatch::Same,
                ..
            }
        )
    }

    /// True when `write` from `caller_pid` would fail with `AlreadyLocked`.
    pub const fn is_held_by_other(&self, caller_pid: u32) -> bool {
        match self {
            Self::LiveOwner {
                pid,
                executable: ExecutableMatch::Same,
            } => *pid != caller_pid,
            _ => false,
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFile => write!(f, "no PID file"),
            Self::Invalid => write!(f, "invalid PID file content"),
            Self::StaleOwner { pid } => write!(f, "stale (process {pid} is not running)"),
            Self::LiveOwner {
                pid,
                executable: ExecutableMatch::Same,
            } => write!(f, "held by running process {pid}"),
            Self::LiveOwner {
                pid,
                executable: ExecutableMatch::Different,
            } => write!(f, "process {pid} is running a different executable"),
        }
    }
}

/// Executable names of a recorded process and of the caller.
#[derive(Debug)]
pub(super) struct ExecutableCheck {
    pid: u32,
    expected: Option<String>,
    actual: Option<String>,
}

impl ExecutableCheck {
    pub(super) fn run<P: ProcessSignal>(process: &P, pid: u32) -> Self {
        Self {
            pid,
            expected: process.executable_name(process.current_pid()),
            actual: process.executable_name(pid),
        }
    }

    /// Unknown names never match.
    pub(super) fn matches(&self) -> bool {
        matches!((&self.actual, &self.expected), (Some(a), Some(e)) if a == e)
    }

    pub(super) fn as_match(&self) -> ExecutableMatch {
        if self.matches() {
            ExecutableMatch::Same
        } else {
            ExecutableMatch::Different
        }
    }

    pub(super) fn into_error(self) -> LockFileError {
        LockFileError::ExecutableMismatch {
            pid: self.pid,
            expected: self.expected,
            actual: self.actual,
        }
    }
}
