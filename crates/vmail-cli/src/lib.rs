//! vmail CLI - Administration of Postfix virtual domains, users and aliases
//!
//! The `vmailctl` binary parses its arguments with [`args::Cli`], validates
//! them into a [`command::Command`] and hands that to a
//! [`dispatch::Dispatcher`] bound to the configured database.

pub mod args;
pub mod command;
pub mod dispatch;
pub mod prompt;

use anyhow::Result;
use args::Cli;
use command::Command;
use dispatch::Dispatcher;
use prompt::Prompt;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, warn};
use vmail_common::Config;
use vmail_storage::DatabasePool;

/// How an operation ended when it did not raise an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A user-facing failure that has already been reported
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Load configuration, validate arguments and run the requested operation.
///
/// Configuration and argument problems are reported on `out` before any
/// database connection is opened.
pub async fn run(cli: &Cli, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<Outcome> {
    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                path = %cli.config.display(),
                code = e.code(),
                error = %e,
                "Failed to load configuration"
            );
            writeln!(
                out,
                "Error opening configuration file '{}': {}",
                cli.config.display(),
                e
            )?;
            return Ok(Outcome::Failed);
        }
    };

    let command = match Command::parse(cli.operation, &cli.arguments) {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "{}", e)?;
            return Ok(Outcome::Failed);
        }
    };

    debug!(operation = %cli.operation, "Arguments validated");

    let pool = DatabasePool::new(&config.database).await?;
    Dispatcher::new(pool).run(command, cli.force, prompt, out).await
}
