//! Persistence layer for the Profoma backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query timing metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

/// Embedded SQL migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./src/migrations");
