//! Stop command handler.
//!
//! Reads the PID of the running instance and asks it to shut down. On
//! Windows the Ctrl-Break event only reaches an instance started in the same
//! console as its own process group.

use std::path::Path;

use anyhow::{Context, Result};
use pidguard_core::{LockFile, LockFileError, send_interrupt};
use tracing::debug;

use crate::error::CliError;

/// Execute the stop command.
///
/// A process that exits between reading the PID file and delivering the
/// signal is reported but not treated as a failure.
pub fn execute(pid_file: &Path) -> Result<()> {
    let pid = match LockFile::new(pid_file).read_valid_pid() {
        Ok(pid) => pid,
        Err(e) if is_not_running(&e) => {
            return Err(e).context(CliError::NotRunning {
                path: pid_file.to_path_buf(),
            });
        }
        Err(e) => return Err(e).context("Failed to read PID file"),
    };

    debug!(pid, "Sending interrupt");
    match send_interrupt(pid) {
        Ok(()) => {
            println!("Sent interrupt to PID {pid}");
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("Process {pid} already exited");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to interrupt process {pid}")),
    }
}

/// Verdicts meaning there is no instance to stop, as opposed to a broken PID file.
fn is_not_running(err: &LockFileError) -> bool {
    err.is_not_found()
        || matches!(
            err,
            LockFileError::ProcessNotFound { .. }
                | LockFileError::ExecutableMismatch { .. }
                | LockFileError::InvalidContent { .. }
        )
}
