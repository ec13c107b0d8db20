//! Available subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the PID file and run until interrupted, then remove it
    Run {
        /// Take over the PID file even if another instance holds it
        #[arg(short, long)]
        force: bool,
    },

    /// Show who owns the PID file
    Status,

    /// Interrupt the running instance recorded in the PID file
    Stop,

    /// Remove a stale or invalid PID file left behind by a crash
    Clean {
        /// Remove the file even if a running instance owns it
        #[arg(short, long)]
        force: bool,
    },
}
