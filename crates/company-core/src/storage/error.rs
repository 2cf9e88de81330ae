//! Storage error handling
//!
//! Provides typed errors for store operations with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::DepartmentId;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required text field was empty after trimming
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// Referenced department does not exist
    #[error("Department {id} not found")]
    DepartmentNotFound { id: DepartmentId },

    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Database file could not be opened
    #[error("Failed to open database at '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database is busy, locked, read-only or failing at the I/O level
    #[error("Storage unavailable: {source}")]
    Unavailable {
        #[source]
        source: rusqlite::Error,
    },

    /// Any other SQLite error
    #[error("Database error: {0}")]
    Database(rusqlite::Error),
}

/// Coarse classification surfaced to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty required field
    Validation,
    /// Referenced record does not exist
    NotFound,
    /// Persistence engine cannot be reached or used
    StorageUnavailable,
}

impl From<rusqlite::Error> for StoreError {
    /// Classifies the error based on its SQLite result code
    fn from(error: rusqlite::Error) -> Self {
        if is_unavailable_error(&error) {
            StoreError::Unavailable { source: error }
        } else {
            StoreError::Database(error)
        }
    }
}

impl StoreError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation { .. } => ErrorKind::Validation,
            StoreError::DepartmentNotFound { .. } => ErrorKind::NotFound,
            StoreError::CreateDirectory { .. }
            | StoreError::Open { .. }
            | StoreError::Unavailable { .. }
            | StoreError::Database(_) => ErrorKind::StorageUnavailable,
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::Open { .. } => {
                Some("Check the data_dir setting and the permissions of the database file.")
            }
            StoreError::Unavailable { .. } => {
                Some("Another process may hold the database. Close it and try again.")
            }
            _ => None,
        }
    }
}

/// Check if a SQLite error means the database cannot be used right now
fn is_unavailable_error(error: &rusqlite::Error) -> bool {
    use rusqlite::ErrorCode;

    match error {
        rusqlite::Error::SqliteFailure(err, _) => matches!(
            err.code,
            ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::ReadOnly
                | ErrorCode::DiskFull
                | ErrorCode::PermissionDenied
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
        ),
        _ => false,
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
