//! The PID file protocol.
//!
//! Provides owner verification, atomic replacement and guarded removal for
//! one PID file.
//!
//! # Ownership rules
//! - `write` takes over a missing, invalid, stale or foreign-program file,
//!   is a no-op when the caller already owns it, and fails with
//!   `AlreadyLocked` when another live instance of the same program owns it.
//! - `remove` deletes only a file the caller can prove it owns. A missing
//!   file is success; anything else that fails verification is an error and
//!   the file is left alone.
//! - `write_force` / `remove_force` skip verification entirely.
//!
//! Every operation on an empty path fails with `EmptyPath` before touching
//! the filesystem.

mod guard;
mod io;
#[cfg(test)]
pub(crate) mod testing;
mod verify;

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{LockFileError, LockFileResult};
use crate::process::{ProcessSignal, SystemProcess};

pub use guard::LockGuard;
pub use verify::{ExecutableMatch, Ownership};
use verify::ExecutableCheck;

/// A PID file at a path.
///
/// Holds no state besides the path; everything else lives in the filesystem.
/// `P` supplies liveness checks and the caller's identity, and defaults to
/// the host's process table.
#[derive(Debug, Clone)]
pub struct LockFile<P = SystemProcess> {
    path: PathBuf,
    process: P,
}

impl LockFile {
    /// PID file at `path`, verified against the host's process table.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_process(path, SystemProcess)
    }
}

/// The unset lock file. Every operation fails with `EmptyPath`.
impl Default for LockFile {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

impl<P: ProcessSignal> LockFile<P> {
    /// PID file at `path`, verified with a custom process table.
    pub fn with_process(path: impl Into<PathBuf>, process: P) -> Self {
        Self {
            path: path.into(),
            process,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn process(&self) -> &P {
        &self.process
    }

    fn checked_path(&self) -> LockFileResult<&Path> {
        if self.path.as_os_str().is_empty() {
            return Err(LockFileError::EmptyPath);
        }
        Ok(&self.path)
    }

    /// Read the PID from the file without checking that it is running.
    pub fn read_pid(&self) -> LockFileResult<u32> {
        io::read_pid(self.checked_path()?)
    }

    /// Read the PID and verify that a process with that PID is running.
    pub fn read_live_pid(&self) -> LockFileResult<u32> {
        let pid = self.read_pid()?;
        if !self.process.is_alive(pid) {
            return Err(LockFileError::ProcessNotFound { pid });
        }
        Ok(pid)
    }

    /// Read the PID and verify it is a running instance of the caller's program.
    ///
    /// This is the check used by [`write`](Self::write) and
    /// [`remove`](Self::remove), and the one external tools should use before
    /// signalling the PID.
    pub fn read_valid_pid(&self) -> LockFileResult<u32> {
        let pid = self.read_live_pid()?;
        let check = ExecutableCheck::run(&self.process, pid);
        if !check.matches() {
            return Err(check.into_error());
        }
        Ok(pid)
    }

    /// Classify the current content of the file.
    ///
    /// Unlike the `read_*` methods, a missing, invalid or stale file is a
    /// verdict rather than an error. Only `EmptyPath` and I/O failures other
    /// than not-found are returned as errors.
    pub fn inspect(&self) -> LockFileResult<Ownership> {
        let pid = match self.read_pid() {
            Ok(pid) => pid,
            Err(e) if e.is_not_found() => return Ok(Ownership::NoFile),
            Err(e) if e.is_invalid_content() => return Ok(Ownership::Invalid),
            Err(e) => return Err(e),
        };

        if !self.process.is_alive(pid) {
            return Ok(Ownership::StaleOwner { pid });
        }

        let executable = ExecutableCheck::run(&self.process, pid).as_match();
        Ok(Ownership::LiveOwner { pid, executable })
    }

    /// Record the caller's PID unless another instance of the same program owns the file.
    ///
    /// Succeeds without writing when the file already holds the caller's PID.
    /// The file is replaced atomically, so readers never see partial content.
    pub fn write(&self) -> LockFileResult<()> {
        let path = self.checked_path()?;
        let own_pid = self.process.current_pid();

        match self.read_valid_pid() {
            Ok(pid) if pid == own_pid => {
                trace!(path = %path.display(), pid, "PID file already held by this process");
                Ok(())
            }
            Ok(pid) => Err(LockFileError::AlreadyLocked {
                pid,
                path: path.to_path_buf(),
            }),
            Err(reason) => {
                debug!(
                    path = %path.display(),
                    pid = own_pid,
                    reason = %reason,
                    "No valid owner, writing PID file"
                );
                io::write_pid(path, own_pid)
            }
        }
    }

    /// Record the caller's PID regardless of the current owner.
    pub fn write_force(&self) -> LockFileResult<()> {
        let path = self.checked_path()?;
        let own_pid = self.process.current_pid();
        debug!(path = %path.display(), pid = own_pid, "Force-writing PID file");
        io::write_pid(path, own_pid)
    }

    /// Delete the file if it holds the caller's PID.
    ///
    /// A missing file is success. A file that is invalid, stale, or owned by
    /// another process is left in place and reported as an error.
    pub fn remove(&self) -> LockFileResult<()> {
        let path = self.checked_path()?;
        let own_pid = self.process.current_pid();

        match self.read_valid_pid() {
            Err(e) if e.is_not_found() => {
                trace!(path = %path.display(), "PID file already gone");
                Ok(())
            }
            Err(e) => Err(LockFileError::InvalidOwner {
                path: path.to_path_buf(),
                source: Box::new(e),
            }),
            Ok(pid) if pid != own_pid => Err(LockFileError::OwnershipConflict {
                pid,
                path: path.to_path_buf(),
            }),
            Ok(_) => {
                debug!(path = %path.display(), pid = own_pid, "Removing PID file");
                io::remove(path)
            }
        }
    }

    /// Delete the file without any ownership check. A missing file is success.
    pub fn remove_force(&self) -> LockFileResult<()> {
        let path = self.checked_path()?;
        debug!(path = %path.display(), "Force-removing PID file");
        io::remove(path)
    }

    /// [`write`](Self::write) and return a guard that removes the file on drop.
    pub fn acquire(self) -> LockFileResult<LockGuard<P>> {
        self.write()?;
        Ok(LockGuard::new(self))
    }

    /// [`write_force`](Self::write_force) and return a guard that removes the file on drop.
    pub fn acquire_force(self) -> LockFileResult<LockGuard<P>> {
        self.write_force()?;
        Ok(LockGuard::new(self))
    }
}

/// Constructs a [`LockFile`] and calls [`LockFile::read_pid`].
pub fn read_pid(path: impl AsRef<Path>) -> LockFileResult<u32> {
    LockFile::new(path.as_ref()).read_pid()
}

/// Constructs a [`LockFile`] and calls [`LockFile::read_live_pid`].
pub fn read_live_pid(path: impl AsRef<Path>) -> LockFileResult<u32> {
    LockFile::new(path.as_ref()).read_live_pid()
}

/// Constructs a [`LockFile`] and calls [`LockFile::read_valid_pid`].
pub fn read_valid_pid(path: impl AsRef<Path>) -> LockFileResult<u32> {
    LockFile::new(path.as_ref()).read_valid_pid()
}

/// Constructs a [`LockFile`] and calls [`LockFile::write`].
pub fn write(path: impl AsRef<Path>) -> LockFileResult<()> {
    LockFile::new(path.as_ref()).write()
}

/// Constructs a [`LockFile`] and calls [`LockFile::write_force`].
pub fn write_force(path: impl AsRef<Path>) -> LockFileResult<()> {
    LockFile::new(path.as_ref()).write_force()
}

/// Constructs a [`LockFile`] and calls [`LockFile::remove`].
pub fn remove(path: impl AsRef<Path>) -> LockFileResult<()> {
    LockFile::new(path.as_ref()).remove()
}

/// Constructs a [`LockFile`] and calls [`LockFile::remove_force`].
pub fn remove_force(path: impl AsRef<Path>) -> LockFileResult<()> {
    LockFile::new(path.as_ref()).remove_force()
}
