//! RAII ownership of a PID file.

use std::path::Path;

use tracing::warn;

use super::LockFile;
use crate::error::LockFileResult;
use crate::process::{ProcessSignal, SystemProcess};

/// Holds a written PID file and removes it on drop.
///
/// Removal on drop goes through [`LockFile::remove`], so a file that was
/// taken over by another instance in the meantime is left alone. Failures
/// are logged, never panicked on. Use [`release`](Self::release) to observe
/// the result instead.
#[derive(Debug)]
#[must_use = "the PID file is removed as soon as the guard is dropped"]
pub struct LockGuard<P: ProcessSignal = SystemProcess> {
    lock: LockFile<P>,
    pid: u32,
    armed: bool,
}

impl<P: ProcessSignal> LockGuard<P> {
    pub(super) fn new(lock: LockFile<P>) -> Self {
        let pid = lock.process().current_pid();
        Self {
            lock,
            pid,
            armed: true,
        }
    }

    /// PID recorded in the file when the guard was created.
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        self.lock.path()
    }

    /// Remove the PID file now and report the outcome.
    pub fn release(mut self) -> LockFileResult<()> {
        self.armed = false;
        self.lock.remove()
    }
}

impl<P: ProcessSignal> Drop for LockGuard<P> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.lock.remove() {
            warn!(
                path = %self.lock.path().display(),
                error = %e,
                "Failed to remove PID file"
            );
        }
    }
}
