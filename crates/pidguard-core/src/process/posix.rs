//! Unix process checks via `kill(2)`.

use std::io;

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::error::SignalError;

/// PID 0 and negative values address process groups, not single processes.
fn single_process(pid: u32) -> Option<Pid> {
    if pid == 0 {
        return None;
    }
    i32::try_from(pid).ok().map(Pid::from_raw)
}

pub(super) fn is_alive(pid: u32) -> bool {
    let Some(nix_pid) = single_process(pid) else {
        return false;
    };

    // Null signal: error checking only, nothing is delivered
    match signal::kill(nix_pid, None) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(_) => true, // EPERM: exists but belongs to someone else
    }
}

pub(super) fn send_interrupt(pid: u32) -> Result<(), SignalError> {
    let nix_pid = single_process(pid).ok_or(SignalError::InvalidPid { pid })?;

    signal::kill(nix_pid, Signal::SIGINT).map_err(|errno| match errno {
        Errno::ESRCH => SignalError::NotFound { pid },
        Errno::EPERM => SignalError::PermissionDenied { pid },
        other => SignalError::Os {
            pid,
            source: io::Error::from(other),
        },
    })
}
