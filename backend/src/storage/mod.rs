//! # Storage Module
//!
//! Handles all data persistence for the monthly report service.
//!
//! - **Records**: activities and finance entries in SQLite through SQLx
//! - **Blobs**: uploaded evidence files on the local filesystem
//!
//! The domain layer only sees the traits in [`traits`] and [`blob_store`],
//! so either backend can be swapped without touching the services.

pub mod blob_store;
pub mod connection;
pub mod repositories;
pub mod traits;

/// Text form of every stored calendar date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Re-export the main types that other modules need
pub use blob_store::{BlobMetadata, BlobStore, FsBlobStore};
pub use connection::DbConnection;
pub use repositories::{ActivityRepository, FinanceRepository};
pub use traits::{ActivityStorage, Connection, FinanceStorage};
