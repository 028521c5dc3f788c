//! Wheeltrack Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Wheeltrack.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod portfolios;
pub mod trades;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
