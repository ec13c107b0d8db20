//! Windows process checks via the process snapshot and console control events.

use std::io;

use sysinfo::{Pid, ProcessesToUpdate, System};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, GenerateConsoleCtrlEvent};

use crate::error::SignalError;

pub(super) fn is_alive(pid: u32) -> bool {
    // PID 0 is the idle pseudo-process
    if pid == 0 {
        return false;
    }
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).is_some()
}

/// Raise Ctrl-Break for the process group `pid`.
///
/// Only reaches processes attached to the caller's console that were started
/// as a new process group (`CREATE_NEW_PROCESS_GROUP`).
#[allow(unsafe_code)]
pub(super) fn send_interrupt(pid: u32) -> Result<(), SignalError> {
    if pid == 0 {
        // Group 0 means every process on the caller's console, including us
        return Err(SignalError::InvalidPid { pid });
    }
    if !is_alive(pid) {
        return Err(SignalError::NotFound { pid });
    }

    // SAFETY: both arguments are plain integers; no memory is shared with the call.
    unsafe { GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid) }
        .map_err(|e| SignalError::from_io(pid, io::Error::from(e)))
}
