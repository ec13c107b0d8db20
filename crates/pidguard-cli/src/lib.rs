//! Command-line front end for `pidguard-core`.
//!
//! `pidguard run` holds a PID file for as long as it runs, `pidguard stop`
//! interrupts the running instance, `pidguard status` reports who owns the
//! file and `pidguard clean` removes one left behind by a crash.

#![deny(unsafe_code)]

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
