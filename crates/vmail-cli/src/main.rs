//! vmailctl - Postfix SQL administration entry point

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vmail_cli::args::Cli;
use vmail_cli::prompt::TerminalPrompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    debug!(operation = %cli.operation, config = %cli.config.display(), "Starting vmailctl");

    let mut prompt = TerminalPrompt::new();
    let outcome = vmail_cli::run(&cli, &mut prompt, &mut io::stdout()).await?;

    Ok(outcome.exit_code())
}

/// Log to stderr so stdout only carries operation output
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}
