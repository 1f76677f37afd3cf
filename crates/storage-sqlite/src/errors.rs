//! Storage-specific error types.
//!
//! Wraps rusqlite errors and converts them to the database-agnostic
//! error types defined in `papertrade_core`.

use papertrade_core::errors::{DatabaseError, Error};
use rusqlite::Error as SqliteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] SqliteError),

    #[error("Connection mutex poisoned")]
    ConnectionPoisoned,
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QueryFailed(SqliteError::QueryReturnedNoRows) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::ConnectionPoisoned => Error::Database(DatabaseError::ConnectionFailed(
                "connection mutex poisoned".to_string(),
            )),
        }
    }
}

/// Extension trait converting rusqlite results into core results.
///
/// Orphan rules prevent `impl From<rusqlite::Error> for core::Error`,
/// so repositories call this instead.
pub trait IntoCoreError<T> {
    fn into_core(self) -> papertrade_core::Result<T>;
}

impl<T> IntoCoreError<T> for Result<T, SqliteError> {
    fn into_core(self) -> papertrade_core::Result<T> {
        self.map_err(|e| StorageError::QueryFailed(e).into())
    }
}
