//! Single-instance locking through PID files.
//!
//! A PID file is a file whose only content is the decimal process ID of the
//! program that currently owns it. It is used both to keep a second instance
//! of a program from starting and to let external tools find the running
//! instance and signal it.
//!
//! The crate has two independent halves:
//!
//! - [`LockFile`]: the read/verify/write/remove protocol for one PID file.
//! - [`process`]: the [`ProcessSignal`] capability used to check liveness,
//!   look up executable names and deliver an interrupt.
//!
//! # Example
//!
//! ```no_run
//! use pidguard_core::{LockFile, LockFileError};
//!
//! # fn main() -> Result<(), LockFileError> {
//! let lock = LockFile::new("/run/my-service.pid");
//! match lock.write() {
//!     Ok(()) => {}
//!     Err(e) if e.is_already_locked() => {
//!         eprintln!("already running: {e}");
//!         std::process::exit(1);
//!     }
//!     Err(e) => return Err(e),
//! }
//!
//! // ... run the service ...
//!
//! lock.remove()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! There is a window between verifying that no live owner exists and
//! replacing the file. Two processes starting at the same moment can both
//! pass verification; the last rename wins. This is a best-effort
//! single-instance guard, not a distributed lock.

#![deny(unsafe_code)]

mod error;
pub mod lockfile;
pub mod process;

pub use error::{LockFileError, LockFileResult, SignalError};
pub use lockfile::{
    ExecutableMatch, LockFile, LockGuard, Ownership, read_live_pid, read_pid, read_valid_pid,
    remove, remove_force, write, write_force,
};
pub use process::{ProcessSignal, SystemProcess, send_interrupt};
