//! CLI argument definitions.

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use vmail_common::config::DEFAULT_CONFIG_PATH;

/// Manage virtual domains, users and aliases in a Postfix SQL database
#[derive(Parser, Debug)]
#[command(name = "vmailctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Operation to perform
    #[arg(value_enum)]
    pub operation: Operation,

    /// Force reset without confirmation
    #[arg(long)]
    pub force: bool,

    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Verbose output, including executed SQL statements
    #[arg(long)]
    pub verbose: bool,

    /// Operation arguments: names, addresses or search patterns
    pub arguments: Vec<String>,
}

/// Available operations
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Drop and recreate the virtual tables
    Reset,
    /// Add a virtual domain
    AddDomain,
    /// Search virtual domains by name prefix
    SearchDomains,
    /// Not implemented
    DeleteDomain,
    /// Add a virtual user; the password is read from the terminal or stdin
    AddUser,
    /// Search virtual users by email prefix
    SearchUsers,
    /// Delete a virtual user by exact email
    DeleteUser,
    /// Add a virtual alias from a source to a destination address
    AddAlias,
    /// Search virtual aliases by source and destination prefixes
    SearchAliases,
    /// Delete virtual aliases by source and destination prefixes
    DeleteAliases,
}

impl Operation {
    /// Name as typed on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Reset => "reset",
            Operation::AddDomain => "add-domain",
            Operation::SearchDomains => "search-domains",
            Operation::DeleteDomain => "delete-domain",
            Operation::AddUser => "add-user",
            Operation::SearchUsers => "search-users",
            Operation::DeleteUser => "delete-user",
            Operation::AddAlias => "add-alias",
            Operation::SearchAliases => "search-aliases",
            Operation::DeleteAliases => "delete-aliases",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
