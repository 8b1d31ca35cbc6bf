//! Configuration for vmail
//!
//! The configuration file is YAML with a single `database` object:
//!
//! ```yaml
//! database:
//!   type: postgresql   # or sqlite
//!   name: mail         # database name, or file path for sqlite
//!   host: localhost
//!   port: 5432
//!   user: mailadmin
//!   password: secret
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "vmailctl.yml";

const MISSING_FIELDS: &str = "required object 'database' with all required fields not found";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Database backend selected by the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Postgres => write!(f, "postgres"),
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database type as written in the file, e.g. `postgresql` or `sqlite`
    pub db_type: String,

    /// Database name, or file path for sqlite
    pub name: String,

    /// Server connection settings, absent for sqlite
    pub server: Option<ServerConfig>,

    /// Maximum pool connections
    pub max_connections: u32,
}

/// Network location and credentials of a database server
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Shape of the file before required fields are checked
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    database: Option<RawDatabaseConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDatabaseConfig {
    #[serde(rename = "type")]
    db_type: Option<String>,
    name: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
}

fn default_max_connections() -> u32 {
    1
}

fn is_sqlite_type(db_type: &str) -> bool {
    db_type.starts_with("sqlite")
}

impl DatabaseConfig {
    /// Backend implied by the `type` field
    pub fn backend(&self) -> Result<DatabaseBackend> {
        if is_sqlite_type(&self.db_type) {
            Ok(DatabaseBackend::Sqlite)
        } else if self.db_type.starts_with("postgres") {
            Ok(DatabaseBackend::Postgres)
        } else {
            Err(Error::Config(format!(
                "Unsupported database type: {} (expected postgresql or sqlite)",
                self.db_type
            )))
        }
    }

    fn from_raw(raw: RawDatabaseConfig) -> Result<Self> {
        let missing = || Error::Config(MISSING_FIELDS.to_string());

        let db_type = raw.db_type.ok_or_else(missing)?;
        let name = raw.name.ok_or_else(missing)?;

        let server = if is_sqlite_type(&db_type) {
            None
        } else {
            Some(ServerConfig {
                host: raw.host.ok_or_else(missing)?,
                port: raw.port.ok_or_else(missing)?,
                user: raw.user.ok_or_else(missing)?,
                password: raw.password.ok_or_else(missing)?,
            })
        };

        Ok(Self {
            db_type,
            name,
            server,
            max_connections: raw.max_connections.max(1),
        })
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Config(format!("No such file: {}", path.display())));
        }

        let raw: RawConfig = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self::from_raw(raw)?;
        debug!(
            path = %path.display(),
            db_type = %config.database.db_type,
            "Loaded configuration"
        );
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let database = raw
            .database
            .ok_or_else(|| Error::Config(MISSING_FIELDS.to_string()))?;

        Ok(Self {
            database: DatabaseConfig::from_raw(database)?,
        })
    }
}
