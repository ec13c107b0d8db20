//! Cross-platform process liveness checks and interrupt delivery.
//!
//! [`ProcessSignal`] is the capability the PID file protocol verifies owners
//! with. [`SystemProcess`] is the real implementation; which platform code it
//! runs is chosen at compile time:
//!
//! | Operation          | Unix                         | Windows                                   |
//! |--------------------|------------------------------|-------------------------------------------|
//! | `is_alive`         | `kill(pid, 0)`               | process snapshot                          |
//! | `executable_name`  | process table (`sysinfo`)    | process table (`sysinfo`)                 |
//! | `send_interrupt`   | `SIGINT`                     | `GenerateConsoleCtrlEvent(CTRL_BREAK)`    |
//!
//! On Windows the break event only reaches processes sharing the caller's
//! console and process group. There is no way to interrupt an arbitrary
//! unrelated process with the same primitive.

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::SignalError;

#[cfg(unix)]
mod posix;
#[cfg(unix)]
use posix as platform;

#[cfg(windows)]
mod win32;
#[cfg(windows)]
use win32 as platform;

/// Query and signal processes by PID.
///
/// Implementations must not mutate anything in `is_alive` and
/// `executable_name`; they are called during lock verification.
pub trait ProcessSignal {
    /// Whether a process with this PID currently exists.
    ///
    /// A process the caller lacks permission to signal still counts as alive.
    fn is_alive(&self, pid: u32) -> bool;

    /// File name of the executable running as `pid`, if the process exists
    /// and its name can be read.
    fn executable_name(&self, pid: u32) -> Option<String>;

    /// Ask the process to stop gracefully.
    fn send_interrupt(&self, pid: u32) -> Result<(), SignalError>;

    /// PID of the calling process. Read on every call, never cached.
    fn current_pid(&self) -> u32 {
        std::process::id()
    }
}

impl<T: ProcessSignal + ?Sized> ProcessSignal for &T {
    fn is_alive(&self, pid: u32) -> bool {
        (**self).is_alive(pid)
    }

    fn executable_name(&self, pid: u32) -> Option<String> {
        (**self).executable_name(pid)
    }

    fn send_interrupt(&self, pid: u32) -> Result<(), SignalError> {
        (**self).send_interrupt(pid)
    }

    fn current_pid(&self) -> u32 {
        (**self).current_pid()
    }
}

/// The host operating system's process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcess;

impl ProcessSignal for SystemProcess {
    fn is_alive(&self, pid: u32) -> bool {
        platform::is_alive(pid)
    }

    fn executable_name(&self, pid: u32) -> Option<String> {
        process_name(pid)
    }

    fn send_interrupt(&self, pid: u32) -> Result<(), SignalError> {
        platform::send_interrupt(pid)
    }
}

/// Send a graceful-stop request to `pid` using [`SystemProcess`].
///
/// `SIGINT` on Unix, a console Ctrl-Break event on Windows. A
/// [`SignalError::NotFound`] result means the process already exited.
pub fn send_interrupt(pid: u32) -> Result<(), SignalError> {
    SystemProcess.send_interrupt(pid)
}

/// Refresh only `pid` in a fresh process table and return its entry name.
fn process_name(pid: u32) -> Option<String> {
    if pid == 0 {
        return None;
    }
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system
        .process(pid)
        .map(|process| process.name().to_string_lossy().into_owned())
}
