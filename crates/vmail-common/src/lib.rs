//! vmail Common - Shared types and utilities
//!
//! This crate provides configuration loading, the error type, address
//! validation and password hashing shared by the vmail crates.

pub mod config;
pub mod error;
pub mod password;
pub mod types;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
