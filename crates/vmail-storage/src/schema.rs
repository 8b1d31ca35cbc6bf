//! Table definitions for the Postfix virtual tables
//!
//! `reset` drops and recreates all three tables. The DDL differs per
//! backend: PostgreSQL uses `BIGSERIAL` keys and cascading drops, SQLite uses
//! rowid-aliased `INTEGER PRIMARY KEY` columns.

use vmail_common::config::DatabaseBackend;

const POSTGRES_SCHEMA: &[&str] = &[
    "DROP TABLE IF EXISTS virtual_users CASCADE",
    "DROP TABLE IF EXISTS virtual_aliases CASCADE",
    "DROP TABLE IF EXISTS virtual_domains CASCADE",
    r#"
    CREATE TABLE virtual_domains (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX name_idx ON virtual_domains (name)",
    r#"
    CREATE TABLE virtual_users (
        id BIGSERIAL PRIMARY KEY,
        domain_id BIGINT NOT NULL REFERENCES virtual_domains (id) ON DELETE CASCADE,
        password TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX email_idx ON virtual_users (email)",
    r#"
    CREATE TABLE virtual_aliases (
        id BIGSERIAL PRIMARY KEY,
        domain_id BIGINT NOT NULL REFERENCES virtual_domains (id) ON DELETE CASCADE,
        source TEXT NOT NULL,
        destination TEXT NOT NULL
    )
    "#,
    "CREATE INDEX source_idx ON virtual_aliases (source)",
];

const SQLITE_SCHEMA: &[&str] = &[
    "DROP TABLE IF EXISTS virtual_users",
    "DROP TABLE IF EXISTS virtual_aliases",
    "DROP TABLE IF EXISTS virtual_domains",
    r#"
    CREATE TABLE virtual_domains (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX name_idx ON virtual_domains (name)",
    r#"
    CREATE TABLE virtual_users (
        id INTEGER PRIMARY KEY,
        domain_id INTEGER NOT NULL REFERENCES virtual_domains (id) ON DELETE CASCADE,
        password TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX email_idx ON virtual_users (email)",
    r#"
    CREATE TABLE virtual_aliases (
        id INTEGER PRIMARY KEY,
        domain_id INTEGER NOT NULL REFERENCES virtual_domains (id) ON DELETE CASCADE,
        source TEXT NOT NULL,
        destination TEXT NOT NULL
    )
    "#,
    "CREATE INDEX source_idx ON virtual_aliases (source)",
];

/// Statements that reset the schema, in execution order
pub fn reset_statements(backend: DatabaseBackend) -> &'static [&'static str] {
    match backend {
        DatabaseBackend::Postgres => POSTGRES_SCHEMA,
        DatabaseBackend::Sqlite => SQLITE_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_dropped_before_domains() {
        for backend in [DatabaseBackend::Postgres, DatabaseBackend::Sqlite] {
            let statements = reset_statements(backend);
            let position = |needle: &str| {
                statements
                    .iter()
                    .position(|s| s.contains(needle))
                    .unwrap()
            };

            assert!(position("DROP TABLE IF EXISTS virtual_users") < position("DROP TABLE IF EXISTS virtual_domains"));
            assert!(position("DROP TABLE IF EXISTS virtual_aliases") < position("DROP TABLE IF EXISTS virtual_domains"));
            assert!(position("CREATE TABLE virtual_domains") < position("CREATE TABLE virtual_users"));
        }
    }

    #[test]
    fn test_indexes_defined() {
        for backend in [DatabaseBackend::Postgres, DatabaseBackend::Sqlite] {
            let statements = reset_statements(backend);
            assert!(statements.contains(&"CREATE UNIQUE INDEX name_idx ON virtual_domains (name)"));
            assert!(statements.contains(&"CREATE UNIQUE INDEX email_idx ON virtual_users (email)"));
            assert!(statements.contains(&"CREATE INDEX source_idx ON virtual_aliases (source)"));
        }
    }
}
