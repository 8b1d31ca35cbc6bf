//! vmail Storage - Database access for the Postfix virtual tables
//!
//! This crate owns the `virtual_domains`, `virtual_users` and
//! `virtual_aliases` tables on PostgreSQL or SQLite and the repositories
//! that add, search and delete their rows.

pub mod db;
pub mod models;
pub mod repository;
pub mod schema;

pub use db::DatabasePool;
pub use models::*;
pub use repository::*;
