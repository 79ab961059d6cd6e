//! Core error types for streakbloom-core.
//!
//! Streak and freeze decisions are reported as outcome values, not errors.
//! The types here cover the boundary around the engine: input validation,
//! habit lookup, configuration and the persistence collaborator.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streakbloom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Habit lookup errors
    #[error("{0}")]
    Habit(#[from] HabitError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading a key failed
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a key failed
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be used as a file name
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for input that must never reach the engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Date string is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Habit name is empty after trimming
    #[error("Habit name must not be empty")]
    EmptyName,

    /// Habit emoji is empty after trimming
    #[error("Habit emoji must not be empty")]
    EmptyEmoji,
}

/// Habit lookup errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HabitError {
    /// No habit matches the given id or prefix
    #[error("No habit matches '{0}'")]
    NotFound(String),

    /// More than one habit matches the given prefix
    #[error("'{query}' matches {count} habits; use a longer id")]
    Ambiguous { query: String, count: usize },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
