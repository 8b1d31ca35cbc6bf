//! Error types for vmail

use thiserror::Error;

/// Main error type for vmail
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password error: {0}")]
    Password(String),
}

/// Result type alias for vmail
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Password(_) => "PASSWORD_ERROR",
        }
    }
}
