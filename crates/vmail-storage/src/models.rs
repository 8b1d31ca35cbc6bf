//! Database models

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use vmail_common::types::{AliasId, DomainId, UserId};

/// Row conversion used when entries are rendered as text
pub trait Record {
    /// Field name/value pairs in column order
    fn to_map(&self) -> Map<String, Value>;
}

/// Virtual domain model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
}

/// Virtual user model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub domain_id: DomainId,
    pub email: String,
    /// SHA-512-crypt hash, never the clear-text password
    pub password: String,
}

/// Virtual alias model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Alias {
    pub id: AliasId,
    pub domain_id: DomainId,
    pub source: String,
    pub destination: String,
}

impl Record for Domain {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), self.id.into());
        map.insert("name".into(), self.name.clone().into());
        map
    }
}

impl Record for User {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), self.id.into());
        map.insert("domain_id".into(), self.domain_id.into());
        map.insert("email".into(), self.email.clone().into());
        map.insert("password".into(), self.password.clone().into());
        map
    }
}

impl Record for Alias {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), self.id.into());
        map.insert("domain_id".into(), self.domain_id.into());
        map.insert("source".into(), self.source.clone().into());
        map.insert("destination".into(), self.destination.clone().into());
        map
    }
}

/// Result of an add operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome<T> {
    /// A new row was inserted
    Created(Vec<T>),
    /// Matching rows already existed; nothing was inserted
    Existing(Vec<T>),
}
