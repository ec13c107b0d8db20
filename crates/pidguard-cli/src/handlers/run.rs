//! Run command handler.
//!
//! Holds the PID file for the lifetime of the process: written at startup,
//! removed after Ctrl-C / SIGINT (or Ctrl-Break on Windows).

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use pidguard_core::{LockFile, LockFileError};
use tracing::info;

use crate::error::CliError;

/// Execute the run command.
///
/// # Errors
///
/// - [`CliError::AlreadyRunning`] when another instance owns the PID file
/// - PID file I/O errors
/// - Signal handler setup errors
pub async fn execute(pid_file: &Path, force: bool) -> Result<()> {
    // Listen before the PID file exists so an early interrupt still cleans up
    let mut shutdown = Shutdown::listen().map_err(CliError::Shutdown)?;

    let lock = LockFile::new(pid_file);
    let acquired = if force {
        lock.acquire_force()
    } else {
        lock.acquire()
    };

    let guard = match acquired {
        Ok(guard) => guard,
        Err(LockFileError::AlreadyLocked { pid, path }) => {
            return Err(CliError::AlreadyRunning { pid, path }.into());
        }
        Err(e) => return Err(e).context("Failed to write PID file"),
    };

    info!(pid = guard.pid(), path = %guard.path().display(), "Instance started");
    println!(
        "Running as PID {} (PID file: {}). Press Ctrl-C to stop.",
        guard.pid(),
        guard.path().display()
    );

    shutdown.wait().await;

    info!("Shutdown requested, removing PID file");
    guard.release().context("Failed to remove PID file")?;
    println!("Stopped.");
    Ok(())
}

/// Interrupt listeners, registered eagerly.
#[cfg(unix)]
struct Shutdown {
    interrupt: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Shutdown {
    fn listen() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    async fn wait(&mut self) {
        self.interrupt.recv().await;
    }
}

/// Interrupt listeners, registered eagerly.
#[cfg(windows)]
struct Shutdown {
    ctrl_c: tokio::signal::windows::CtrlC,
    // `pidguard stop` raises Ctrl-Break on Windows
    ctrl_break: tokio::signal::windows::CtrlBreak,
}

#[cfg(windows)]
impl Shutdown {
    fn listen() -> io::Result<Self> {
        use tokio::signal::windows::{ctrl_break, ctrl_c};

        Ok(Self {
            ctrl_c: ctrl_c()?,
            ctrl_break: ctrl_break()?,
        })
    }

    async fn wait(&mut self) {
        tokio::select! {
            _ = self.ctrl_c.recv() => {}
            _ = self.ctrl_break.recv() => {}
        }
    }
}
