//! Shared utilities, configuration, and error handling for Curio
//!
//! This crate provides common functionality used across the Curio service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Store acknowledgement types shared by the persistence gateway
//! - Request body extraction

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, ConfigError, Features, RuntimeMode};
pub use db::{DeleteResult, InsertOneResult, RepositoryError, UpdateResult};
pub use error::{Error, Result};
pub use extractors::{JsonBody, PathParam, QueryParams};
