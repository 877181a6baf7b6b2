//! Core error types for risetrack-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! errors carry the taxonomy surfaced by the CLI and HTTP boundaries; the
//! streak engine itself is total and never fails.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for risetrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A record for the day already exists
    #[error("Day '{day}' already exists")]
    DuplicateDay { day: NaiveDate },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised at the CLI and HTTP boundaries.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Not a YYYY-MM-DD calendar date
    #[error("Invalid date '{value}'. Use YYYY-MM-DD.")]
    MalformedDay { value: String },

    /// Not an HH:MM time of day
    #[error("Invalid {field} '{value}'. Use HH:MM.")]
    MalformedTime { field: &'static str, value: String },

    /// Not an integer minute count
    #[error("Invalid tolerance '{value}'. Use an integer.")]
    MalformedTolerance { value: String },

    /// Update payload with no fields set
    #[error("Nothing to update")]
    EmptyUpdate,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
