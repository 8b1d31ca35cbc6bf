//! Validated operations
//!
//! Checks argument counts and address syntax before any storage access.

use crate::args::Operation;
use thiserror::Error;
use vmail_common::validate::{is_valid_domain_name, is_valid_email};

/// Argument problem reported to the user verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidArguments(pub String);

/// An operation with its validated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    AddDomain { name: String },
    DeleteDomain { name: String },
    SearchDomains { pattern: String },
    AddUser { email: String },
    DeleteUser { email: String },
    SearchUsers { pattern: String },
    AddAlias { source: String, destination: String },
    SearchAliases { source: String, destination: String },
    DeleteAliases { source: String, destination: String },
}

impl Command {
    /// Validate the positional arguments of `operation`
    pub fn parse(operation: Operation, arguments: &[String]) -> Result<Self, InvalidArguments> {
        let invalid = |message: String| Err(InvalidArguments(message));

        match operation {
            Operation::Reset => {
                if !arguments.is_empty() {
                    return invalid("reset operation expects no arguments".to_string());
                }
                Ok(Command::Reset)
            }
            Operation::AddDomain | Operation::DeleteDomain => {
                let [name] = arguments else {
                    return invalid(format!(
                        "{} operation requires exactly one argument: domain name",
                        operation
                    ));
                };
                if !is_valid_domain_name(name) {
                    return invalid(format!(
                        "{} operation failed: invalid domain name '{}'",
                        operation, name
                    ));
                }
                let name = name.clone();
                Ok(if operation == Operation::AddDomain {
                    Command::AddDomain { name }
                } else {
                    Command::DeleteDomain { name }
                })
            }
            Operation::SearchDomains => match arguments {
                [] => Ok(Command::SearchDomains {
                    pattern: String::new(),
                }),
                [pattern] => Ok(Command::SearchDomains {
                    pattern: pattern.clone(),
                }),
                _ => invalid(
                    "search-domains operation expects at most one argument: domain name pattern"
                        .to_string(),
                ),
            },
            Operation::AddUser | Operation::DeleteUser => {
                let [email] = arguments else {
                    return invalid(format!(
                        "{} operation requires exactly one argument: user email",
                        operation
                    ));
                };
                if !is_valid_email(email, false) {
                    return invalid(format!(
                        "{} operation failed: invalid email address '{}'",
                        operation, email
                    ));
                }
                let email = email.clone();
                Ok(if operation == Operation::AddUser {
                    Command::AddUser { email }
                } else {
                    Command::DeleteUser { email }
                })
            }
            Operation::SearchUsers => match arguments {
                [] => Ok(Command::SearchUsers {
                    pattern: String::new(),
                }),
                [pattern] => Ok(Command::SearchUsers {
                    pattern: pattern.clone(),
                }),
                _ => invalid(
                    "search-users operation expects at most one argument: user email pattern"
                        .to_string(),
                ),
            },
            Operation::AddAlias => {
                let [source, destination] = arguments else {
                    return invalid(
                        "add-alias operation requires exactly two arguments: source and destination email addresses"
                            .to_string(),
                    );
                };
                if !(is_valid_email(source, true) && is_valid_email(destination, true)) {
                    return invalid(format!(
                        "add-alias operation failed: invalid email address in alias '{}' -> '{}'",
                        source, destination
                    ));
                }
                Ok(Command::AddAlias {
                    source: source.clone(),
                    destination: destination.clone(),
                })
            }
            Operation::SearchAliases | Operation::DeleteAliases => {
                let (source, destination) = match arguments {
                    [] => (String::new(), String::new()),
                    [source] => (source.clone(), String::new()),
                    [source, destination] => (source.clone(), destination.clone()),
                    _ => {
                        return invalid(format!(
                            "{} operation expects at most two arguments: source and destination email patterns",
                            operation
                        ))
                    }
                };
                Ok(if operation == Operation::SearchAliases {
                    Command::SearchAliases { source, destination }
                } else {
                    Command::DeleteAliases { source, destination }
                })
            }
        }
    }
}
