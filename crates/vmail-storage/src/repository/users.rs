//! Virtual user repository

use crate::db::DatabasePool;
use crate::models::{AddOutcome, User};
use crate::repository::{domains, MatchMode};
use async_trait::async_trait;
use tracing::{debug, info};
use vmail_common::password::hash_password;
use vmail_common::types::address_domain;
use vmail_common::{Error, Result};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Add a user whose address domain is registered exactly once.
    ///
    /// The clear-text password is hashed before it is stored. Returns `None`
    /// when the domain of `email` can not be used.
    async fn add(&self, email: &str, password: &str) -> Result<Option<AddOutcome<User>>>;

    /// Users whose email equals or starts with `pattern`, in id order
    async fn search(&self, pattern: &str, exact: bool) -> Result<Vec<User>>;

    /// Delete users whose email equals `email` and return them
    async fn delete(&self, email: &str) -> Result<Vec<User>>;
}

/// Database user repository
pub struct DbUserRepository {
    pool: DatabasePool,
}

impl DbUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn add(&self, email: &str, password: &str) -> Result<Option<AddOutcome<User>>> {
        let Some(domain_name) = address_domain(email) else {
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

        let existing = sqlx::query_as::<_, User>(
            "SELECT id, domain_id, email, password FROM virtual_users WHERE email = $1 ORDER BY id",
        )
        .bind(email)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        if !existing.is_empty() {
            debug!(email, "Virtual user already exists");
            return Ok(Some(AddOutcome::Existing(existing)));
        }

        let password_hash = hash_password(password, None)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO virtual_users (domain_id, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, domain_id, email, password
            "#,
        )
        .bind(domain.id)
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(id = user.id, domain_id = user.domain_id, email = %user.email, "Created virtual user");
        Ok(Some(AddOutcome::Created(vec![user])))
    }

    async fn search(&self, pattern: &str, exact: bool) -> Result<Vec<User>> {
        let mode = MatchMode::from_exact(exact);
        let sql = format!(
            "SELECT id, domain_id, email, password FROM virtual_users WHERE {} ORDER BY id",
            mode.condition("email", 1)
        );

        debug!(pattern, ?mode, "Searching virtual users");

        sqlx::query_as::<_, User>(&sql)
            .bind(mode.bind_value(pattern))
            .fetch_all(self.pool.pool())
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    async fn delete(&self, email: &str) -> Result<Vec<User>> {
        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut deleted = sqlx::query_as::<_, User>(
            "DELETE FROM virtual_users WHERE email = $1 RETURNING id, domain_id, email, password",
        )
        .bind(email)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        deleted.sort_by_key(|user| user.id);
        info!(email, count = deleted.len(), "Deleted virtual users");
        Ok(deleted)
    }
}
