//! SQLite storage implementation for Wheeltrack.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `wheeltrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, portfolios, and trades
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates are database-agnostic and work with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod portfolios;
pub mod trades;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from wheeltrack-core for convenience
pub use wheeltrack_core::errors::{DatabaseError, Error, Result};
