//! Status command handler.

use std::path::Path;

use anyhow::{Context, Result};
use pidguard_core::{ExecutableMatch, LockFile, Ownership};

/// Exit code for a verdict, following the LSB init-script `status` convention.
///
/// 0 running, 1 not running but PID file exists, 3 not running, 4 unknown.
pub const fn status_code(ownership: &Ownership) -> u8 {
    match ownership {
        Ownership::LiveOwner {
            executable: ExecutableMatch::Same,
            ..
        } => 0,
        Ownership::StaleOwner { .. }
        | Ownership::LiveOwner {
            executable: ExecutableMatch::Different,
            ..
        } => 1,
        Ownership::NoFile => 3,
        Ownership::Invalid => 4,
    }
}

/// Execute the status command and return the exit code to report.
pub fn execute(pid_file: &Path) -> Result<u8> {
    let ownership = LockFile::new(pid_file)
        .inspect()
        .context("Failed to inspect PID file")?;

    println!("{}: {ownership}", pid_file.display());
    Ok(status_code(&ownership))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn codes_follow_lsb_convention() {
        assert_eq!(
            status_code(&Ownership::LiveOwner {
                pid: 1,
                executable: ExecutableMatch::Same
            }),
            0
        );
        assert_eq!(status_code(&Ownership::StaleOwner { pid: 1 }), 1);
        assert_eq!(status_code(&Ownership::NoFile), 3);
        assert_eq!(status_code(&Ownership::Invalid), 4);
    }

    #[test]
    fn missing_file_reports_not_running() {
        let dir = tempdir().expect("tempdir");
        let code = execute(&dir.path().join("none.pid")).expect("status");
        assert_eq!(code, 3);
    }

    #[test]
    fn own_pid_reports_running() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("self.pid");
        fs::write(&path, std::process::id().to_string()).expect("seed");
        assert_eq!(execute(&path).expect("status"), 0);
    }
}
