//! CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pidguard_cli::error::exit_code;
use pidguard_cli::{Cli, Commands, handlers};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env before clap reads PIDGUARD_PID_FILE
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<u8> {
    let pid_file = cli.pid_file.as_path();

    match cli.command {
        Commands::Run { force } => handlers::run::execute(pid_file, force).await?,
        Commands::Status => return handlers::status::execute(pid_file),
        Commands::Stop => handlers::stop::execute(pid_file)?,
        Commands::Clean { force } => handlers::clean::execute(pid_file, force)?,
    }
    Ok(0)
}
