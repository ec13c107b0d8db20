//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Keep a single instance running and control it through its PID file.
#[derive(Parser, Debug)]
#[command(name = "pidguard")]
#[command(about = "Single-instance guard built on PID files")]
#[command(version)]
pub struct Cli {
    /// PID file shared by the running instance and control commands
    #[arg(
        short = 'p',
        long = "pid-file",
        env = "PIDGUARD_PID_FILE",
        global = true,
        default_value = "pidguard.pid"
    )]
    pub pid_file: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["pidguard", "--verbose", "--pid-file", "/tmp/a.pid", "status"]);
        assert!(cli.verbose);
        assert_eq!(cli.pid_file, PathBuf::from("/tmp/a.pid"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["pidguard", "run", "--force", "-p", "x.pid"]);
        assert_eq!(cli.pid_file, PathBuf::from("x.pid"));
        assert!(matches!(cli.command, Commands::Run { force: true }));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["pidguard"]).is_err());
    }
}
