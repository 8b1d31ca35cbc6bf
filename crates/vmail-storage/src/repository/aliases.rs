//! Virtual alias repository

use crate::db::DatabasePool;
use crate::models::{AddOutcome, Alias};
use crate::repository::{domains, MatchMode};
use async_trait::async_trait;
use tracing::{debug, info};
use vmail_common::types::address_domain;
use vmail_common::{Error, Result};

/// Alias repository trait
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Add a `source -> destination` alias.
    ///
    /// Only the source domain has to be registered; the destination is
    /// stored verbatim. Returns `None` when the source domain can not be used.
    async fn add(&self, source: &str, destination: &str) -> Result<Option<AddOutcome<Alias>>>;

    /// Aliases matching both patterns, in id order
    async fn search(&self, source: &str, destination: &str, exact: bool) -> Result<Vec<Alias>>;

    /// Delete aliases whose source and destination start with the given
    /// prefixes and return them
    async fn delete(&self, source: &str, destination: &str) -> Result<Vec<Alias>>;
}

/// Database alias repository
pub struct DbAliasRepository {
    pool: DatabasePool,
}

impl DbAliasRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn alias_filter(mode: MatchMode) -> String {
    format!(
        "{} AND {}",
        mode.condition("source", 1),
        mode.condition("destination", 2)
    )
}

#[async_trait]
impl AliasRepository for DbAliasRepository {
    async fn add(&self, source: &str, destination: &str) -> Result<Option<AddOutcome<Alias>>> {
        let Some(domain_name) = address_domain(source) else {
            return Ok(None);
        };

        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let domains = domains::find_by_name(&mut tx, domain_name).await?;
        let [domain] = domains.as_slice() else {
            debug!(domain = domain_name, matches = domains.len(), "Domain can not be used");
            return Ok(None);
        };

        let existing = sqlx::query_as::<_, Alias>(
            r#"
            SELECT id, domain_id, source, destination FROM virtual_aliases
            WHERE source = $1 AND destination = $2
            ORDER BY id
            "#,
        )
        .bind(source)
        .bind(destination)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        if !existing.is_empty() {
            debug!(source, destination, "Virtual alias already exists");
            return Ok(Some(AddOutcome::Existing(existing)));
        }

        let alias = sqlx::query_as::<_, Alias>(
            r#"
            INSERT INTO virtual_aliases (domain_id, source, destination)
            VALUES ($1, $2, $3)
            RETURNING id, domain_id, source, destination
            "#,
        )
        .bind(domain.id)
        .bind(source)
        .bind(destination)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(
            id = alias.id,
            source = %alias.source,
            destination = %alias.destination,
            "Created virtual alias"
        );
        Ok(Some(AddOutcome::Created(vec![alias])))
    }

    async fn search(&self, source: &str, destination: &str, exact: bool) -> Result<Vec<Alias>> {
        let mode = MatchMode::from_exact(exact);
        let sql = format!(
            "SELECT id, domain_id, source, destination FROM virtual_aliases WHERE {} ORDER BY id",
            alias_filter(mode)
        );

        debug!(source, destination, ?mode, "Searching virtual aliases");

        sqlx::query_as::<_, Alias>(&sql)
            .bind(mode.bind_value(source))
            .bind(mode.bind_value(destination))
            .fetch_all(self.pool.pool())
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    async fn delete(&self, source: &str, destination: &str) -> Result<Vec<Alias>> {
        let mode = MatchMode::Prefix;
        let sql = format!(
            "DELETE FROM virtual_aliases WHERE {} RETURNING id, domain_id, source, destination",
            alias_filter(mode)
        );

        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut deleted = sqlx::query_as::<_, Alias>(&sql)
            .bind(mode.bind_value(source))
            .bind(mode.bind_value(destination))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        deleted.sort_by_key(|alias| alias.id);
        info!(source, destination, count = deleted.len(), "Deleted virtual aliases");
        Ok(deleted)
    }
}
