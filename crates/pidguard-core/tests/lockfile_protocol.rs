//! End-to-end PID file protocol tests against the host's process table.

use std::fs;
use std::path::PathBuf;

use pidguard_core::{
    ExecutableMatch, LockFile, LockFileError, Ownership, read_live_pid, read_pid, read_valid_pid,
    remove, remove_force, write, write_force,
};
use tempfile::{TempDir, tempdir};

/// An existing, empty PID file inside a fresh temp dir.
fn empty_pid_file() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pidfile-test.pid");
    fs::write(&path, "").expect("create empty file");
    (dir, path)
}

#[test]
fn full_lifecycle() {
    let (_dir, path) = empty_pid_file();

    // Empty content cannot be proven to be ours
    assert!(remove(&path).is_err());
    assert!(path.exists());

    write(&path).expect("write");
    assert_eq!(read_valid_pid(&path).expect("valid"), std::process::id());

    write(&path).expect("second write");
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        std::process::id().to_string()
    );

    remove(&path).expect("remove");
    assert!(!path.exists());
}

#[test]
fn missing_file_remove_is_noop_and_write_creates() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.pid");

    remove(&path).expect("nothing to remove");
    assert!(read_pid(&path).expect_err("no file").is_not_found());

    write(&path).expect("write");
    assert_eq!(read_valid_pid(&path).expect("valid"), std::process::id());
}

#[test]
fn stale_pid_is_reclaimed() {
    let (_dir, path) = empty_pid_file();
    fs::write(&path, "2147483647").expect("seed");

    assert_eq!(read_pid(&path).expect("well-formed"), 2_147_483_647);
    assert!(matches!(
        read_live_pid(&path),
        Err(LockFileError::ProcessNotFound { .. })
    ));
    assert!(read_valid_pid(&path).is_err());
    assert!(remove(&path).is_err());

    write(&path).expect("stale lock should be taken over");
    assert_eq!(read_valid_pid(&path).expect("valid"), std::process::id());
}

#[test]
fn invalid_content_is_a_parse_error() {
    let (_dir, path) = empty_pid_file();

    for bad in ["0xABCDEFGH", "", " 42"] {
        fs::write(&path, bad).expect("seed");
        let err = read_pid(&path).expect_err(bad);
        assert!(err.is_invalid_content(), "{bad:?} gave {err}");
        assert!(remove(&path).is_err(), "{bad:?} was removable");
        assert!(path.exists());
    }
}

#[test]
fn empty_path_is_rejected() {
    assert!(matches!(write(""), Err(LockFileError::EmptyPath)));
    assert!(matches!(write_force(""), Err(LockFileError::EmptyPath)));
    assert!(matches!(remove(""), Err(LockFileError::EmptyPath)));
    assert!(matches!(remove_force(""), Err(LockFileError::EmptyPath)));
    assert!(matches!(read_pid(""), Err(LockFileError::EmptyPath)));
    let unset: LockFile = LockFile::default();
    assert!(matches!(unset.write(), Err(LockFileError::EmptyPath)));
}

#[test]
fn force_operations_on_missing_paths() {
    let dir = tempdir().expect("tempdir");

    remove_force(dir.path().join("notexists")).expect("missing file is fine");

    let err = write_force(dir.path().join("notexists").join("service.pid"))
        .expect_err("parent directory is missing");
    assert!(matches!(err, LockFileError::Io { .. }));
}

#[test]
fn directory_is_not_a_valid_pid_file() {
    let dir = tempdir().expect("tempdir");
    assert!(LockFile::new(dir.path()).read_valid_pid().is_err());
}

#[test]
fn inspect_sees_own_lock() {
    let dir = tempdir().expect("tempdir");
    let lock = LockFile::new(dir.path().join("service.pid"));

    assert_eq!(lock.inspect().expect("inspect"), Ownership::NoFile);
    lock.write().expect("write");
    assert_eq!(
        lock.inspect().expect("inspect"),
        Ownership::LiveOwner {
            pid: std::process::id(),
            executable: ExecutableMatch::Same,
        }
    );
}

#[test]
fn guard_cleans_up_on_drop() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.pid");

    {
        let guard = LockFile::new(&path).acquire().expect("acquire");
        assert_eq!(guard.pid(), std::process::id());
        assert!(path.exists());
    }
    assert!(!path.exists());
}

#[cfg(unix)]
mod unix {
    use super::*;
    use pidguard_core::send_interrupt;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{Child, Command};

    fn sleeper() -> Child {
        Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("failed to spawn sleep")
    }

    #[test]
    fn interrupt_stops_a_child() {
        let mut child = sleeper();

        send_interrupt(child.id()).expect("interrupt");
        let status = child.wait().expect("wait");

        // SIGINT
        assert_eq!(status.signal(), Some(2));
    }

    #[test]
    fn interrupt_to_reaped_process_is_not_found() {
        let mut child = sleeper();
        let pid = child.id();
        child.kill().expect("kill");
        child.wait().expect("wait");

        let err = send_interrupt(pid).expect_err("process is gone");
        assert!(err.is_not_found());
    }

    #[test]
    fn live_process_of_other_program_is_taken_over() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("service.pid");
        let mut child = sleeper();
        fs::write(&path, child.id().to_string()).expect("seed");

        let lock = LockFile::new(&path);
        assert_eq!(lock.read_live_pid().expect("alive"), child.id());
        assert!(matches!(
            lock.read_valid_pid(),
            Err(LockFileError::ExecutableMismatch { .. })
        ));
        assert!(matches!(
            lock.inspect().expect("inspect"),
            Ownership::LiveOwner {
                executable: ExecutableMatch::Different,
                ..
            }
        ));
        assert!(lock.remove().is_err());

        lock.write().expect("foreign program does not hold the lock");
        assert_eq!(lock.read_valid_pid().expect("valid"), std::process::id());

        child.kill().expect("kill");
        child.wait().expect("wait");
    }
}
