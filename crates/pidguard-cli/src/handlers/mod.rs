//! Command handlers.
//!
//! Each handler is a thin wrapper over `pidguard-core`: call the protocol
//! operation, add context to failures, print the outcome.

pub mod clean;
pub mod run;
pub mod status;
pub mod stop;
