//! Clean command handler.
//!
//! Removes PID files left behind by crashed instances. Without `--force` a
//! file naming another running instance of this program is kept.

use std::path::Path;

use anyhow::{Context, Result};
use pidguard_core::{LockFile, Ownership};

use crate::error::CliError;

pub fn execute(pid_file: &Path, force: bool) -> Result<()> {
    let lock = LockFile::new(pid_file);

    if force {
        lock.remove_force().context("Failed to remove PID file")?;
        println!("Removed {}", pid_file.display());
        return Ok(());
    }

    match lock.inspect().context("Failed to inspect PID file")? {
        Ownership::NoFile => println!("No PID file at {}", pid_file.display()),
        owner if owner.is_held_by_other(std::process::id()) => {
            return Err(CliError::StillRunning {
                pid: owner.pid().unwrap_or_default(),
            }
            .into());
        }
        owner => {
            lock.remove_force().context("Failed to remove PID file")?;
            println!("Removed {} ({owner})", pid_file.display());
        }
    }
    Ok(())
}
