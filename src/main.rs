//! Latch: leader-coordinated locks and do-once guards for cooperating
//! agent processes.
//!
//! This is the main entry point for the `latch` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod leader;
pub mod lock;
pub mod socket;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes help/version to stdout and usage errors to
            // stderr. The lock commands promise exit 1 for usage errors.
            let code = if err.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            return ExitCode::from(code as u8);
        }
    };

    // Diagnostics go to stderr so `get` and `do` output stays scriptable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match commands::dispatch(cli.command).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
