mod cli;
mod commands;
mod error;
mod metadata;
mod output;

use clap::Parser;
use rupeetick_core::Envelope;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            tracing::debug!(exit_code = error.exit_code(), "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let envelope = commands::run(&cli).await?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if cli.strict {
        check_strict(&envelope)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Fallback notices and unlisted-symbol warnings are the only soft failures.
fn check_strict<T>(envelope: &Envelope<T>) -> Result<(), CliError> {
    if envelope.meta.warnings.is_empty() {
        return Ok(());
    }
    Err(CliError::StrictModeViolation {
        warning_count: envelope.meta.warnings.len(),
    })
}
