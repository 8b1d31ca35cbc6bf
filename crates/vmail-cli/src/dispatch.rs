//! Operation dispatch
//!
//! Runs a validated [`Command`] against the repositories and reports the
//! result on the output stream.

use crate::command::Command;
use crate::prompt::Prompt;
use crate::Outcome;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;
use tracing::{debug, info};
use vmail_common::types::address_domain;
use vmail_storage::{
    AddOutcome, AliasRepository, AliasRepositoryTrait, DatabasePool, DomainRepository,
    DomainRepositoryTrait, Record, UserRepository, UserRepositoryTrait,
};

const RESET_QUESTION: &str =
    "Are you sure you want to reset the database? This will delete all data. (yes/no): ";

/// Executes commands against one database
pub struct Dispatcher {
    pool: DatabasePool,
    domains: Box<dyn DomainRepositoryTrait>,
    users: Box<dyn UserRepositoryTrait>,
    aliases: Box<dyn AliasRepositoryTrait>,
}

impl Dispatcher {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            domains: Box::new(DomainRepository::new(pool.clone())),
            users: Box::new(UserRepository::new(pool.clone())),
            aliases: Box::new(AliasRepository::new(pool.clone())),
            pool,
        }
    }

    /// Run `command`, writing user-facing lines to `out`
    pub async fn run(
        &self,
        command: Command,
        force: bool,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        debug!(?command, force, "Dispatching command");

        match command {
            Command::Reset => {
                if !force && !prompt.confirm(RESET_QUESTION)? {
                    writeln!(out, "Reset operation aborted.")?;
                    return Ok(Outcome::Success);
                }
                writeln!(out, "Reset Postfix SQL database")?;
                self.pool.reset().await?;
                info!("Database reset");
            }
            Command::AddDomain { name } => {
                writeln!(out, "Adding virtual domain: {}", name)?;
                let added = self.domains.add(&name).await?;
                report_added(out, "virtual domain", "virtual domain(s)", &added)?;
            }
            Command::DeleteDomain { name } => {
                debug!(name, "Domain deletion requested");
                writeln!(out, "delete-domain operation is not implemented")?;
            }
            Command::SearchDomains { pattern } => {
                writeln!(out, "Searching virtual domain names for {}", pattern)?;
                let rows = self.domains.search(&pattern, false).await?;
                if rows.is_empty() {
                    writeln!(out, "No virtual domains found")?;
                } else {
                    writeln!(out, "Found virtual domain(s): {}", render_joined(&rows))?;
                }
            }
            Command::AddUser { email } => {
                let Some(password) = prompt.password()? else {
                    writeln!(out, "add-user operation failed: no password provided")?;
                    return Ok(Outcome::Failed);
                };

                writeln!(out, "Adding virtual user: {}", email)?;
                let Some(added) = self.users.add(&email, &password).await? else {
                    let domain = address_domain(&email).unwrap_or_default();
                    return domain_failure(out, "add-user", domain);
                };
                report_added(out, "virtual user", "virtual user(s)", &added)?;
            }
            Command::DeleteUser { email } => {
                writeln!(out, "Deleting virtual user account: {}", email)?;
                let rows = self.users.delete(&email).await?;
                if rows.is_empty() {
                    writeln!(out, "No virtual user accounts deleted")?;
                } else {
                    writeln!(out, "Deleted virtual user account(s): {}", render_joined(&rows))?;
                }
            }
            Command::SearchUsers { pattern } => {
                writeln!(out, "Searching virtual user accounts for {}", pattern)?;
                let rows = self.users.search(&pattern, false).await?;
                if rows.is_empty() {
                    writeln!(out, "No virtual user accounts found")?;
                } else {
                    writeln!(out, "Found virtual user account(s): {}", render_joined(&rows))?;
                }
            }
            Command::AddAlias {
                source,
                destination,
            } => {
                writeln!(out, "Adding virtual alias: {} -> {}", source, destination)?;
                let Some(added) = self.aliases.add(&source, &destination).await? else {
                    let domain = address_domain(&source).unwrap_or_default();
                    return domain_failure(out, "add-alias", domain);
                };
                report_added(out, "virtual alias", "virtual alias(es)", &added)?;
            }
            Command::SearchAliases {
                source,
                destination,
            } => {
                writeln!(out, "Searching virtual aliases for {} -> {}", source, destination)?;
                let rows = self.aliases.search(&source, &destination, false).await?;
                if rows.is_empty() {
                    writeln!(out, "No virtual aliases found")?;
                } else {
                    writeln!(out, "Found virtual alias(es): {}", render_joined(&rows))?;
                }
            }
            Command::DeleteAliases {
                source,
                destination,
            } => {
                writeln!(out, "Deleting virtual alias(es): {} -> {}", source, destination)?;
                let rows = self.aliases.delete(&source, &destination).await?;
                if rows.is_empty() {
                    writeln!(out, "No virtual aliases deleted")?;
                } else {
                    writeln!(out, "Deleted virtual alias(es): {}", render_joined(&rows))?;
                }
            }
        }

        Ok(Outcome::Success)
    }
}

fn domain_failure(out: &mut dyn Write, operation: &str, domain: &str) -> Result<Outcome> {
    writeln!(out, "{} operation failed: domain {} can not be used", operation, domain)?;
    Ok(Outcome::Failed)
}

/// Report the rows an add operation created or found
fn report_added<R: Record>(
    out: &mut dyn Write,
    created: &str,
    existing: &str,
    outcome: &AddOutcome<R>,
) -> Result<()> {
    match outcome {
        AddOutcome::Created(rows) => {
            writeln!(out, "Created new {}: {}", created, render_list(rows))?
        }
        AddOutcome::Existing(rows) => {
            writeln!(out, "Aborted, found existing {}: {}", existing, render_list(rows))?
        }
    }
    Ok(())
}

fn render<R: Record>(row: &R) -> Value {
    Value::Object(row.to_map())
}

/// Rows as one JSON array, as returned by add operations
fn render_list<R: Record>(rows: &[R]) -> String {
    Value::Array(rows.iter().map(render).collect()).to_string()
}

/// Rows as comma separated JSON objects, as listed by search and delete
fn render_joined<R: Record>(rows: &[R]) -> String {
    rows.iter()
        .map(|row| render(row).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
