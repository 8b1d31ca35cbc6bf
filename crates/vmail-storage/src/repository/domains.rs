//! Virtual domain repository

use crate::db::DatabasePool;
use crate::models::{AddOutcome, Domain};
use crate::repository::MatchMode;
use async_trait::async_trait;
use sqlx::AnyConnection;
use tracing::{debug, info};
use vmail_common::{Error, Result};

/// Domain repository trait
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Add a domain unless one with exactly this name exists
    async fn add(&self, name: &str) -> Result<AddOutcome<Domain>>;

    /// Domains whose name equals or starts with `pattern`, in id order
    async fn search(&self, pattern: &str, exact: bool) -> Result<Vec<Domain>>;
}

/// Database domain repository
pub struct DbDomainRepository {
    pool: DatabasePool,
}

impl DbDomainRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Domains named exactly `name`; used to resolve the domain of an address
pub(crate) async fn find_by_name(conn: &mut AnyConnection, name: &str) -> Result<Vec<Domain>> {
    sqlx::query_as::<_, Domain>("SELECT id, name FROM virtual_domains WHERE name = $1 ORDER BY id")
        .bind(name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| Error::Database(e.to_string()))
}

#[async_trait]
impl DomainRepository for DbDomainRepository {
    async fn add(&self, name: &str) -> Result<AddOutcome<Domain>> {
        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let existing = find_by_name(&mut tx, name).await?;
        if !existing.is_empty() {
            debug!(name, "Virtual domain already exists");
            return Ok(AddOutcome::Existing(existing));
        }

        let domain = sqlx::query_as::<_, Domain>(
            "INSERT INTO virtual_domains (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(id = domain.id, name = %domain.name, "Created virtual domain");
        Ok(AddOutcome::Created(vec![domain]))
    }

    async fn search(&self, pattern: &str, exact: bool) -> Result<Vec<Domain>> {
        let mode = MatchMode::from_exact(exact);
        let sql = format!(
            "SELECT id, name FROM virtual_domains WHERE {} ORDER BY id",
            mode.condition("name", 1)
        );

        debug!(pattern, ?mode, "Searching virtual domains");

        sqlx::query_as::<_, Domain>(&sql)
            .bind(mode.bind_value(pattern))
            .fetch_all(self.pool.pool())
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}
