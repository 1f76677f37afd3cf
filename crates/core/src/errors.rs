//! Core error types for the papertrade application.
//!
//! This module defines database-agnostic error types. Storage-specific
//! errors (from rusqlite) are converted to these types by the storage
//! layer.

use thiserror::Error;

use crate::ledger::LedgerError;
use papertrade_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    /// A trade or portfolio command was rejected by the ledger rules.
    #[error("Ledger operation rejected: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for all error details, allowing the storage layer to
/// convert its own error types into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open or configure the database.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Schema creation or migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}
