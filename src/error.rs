//! Unified error types for the users service.

use thiserror::Error;

/// Unified error type for the users service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration was loaded but is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (binding or serving the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resource store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("user {id:?} not found")]
    NotFound {
        /// The id that was looked up, if the caller supplied a usable one.
        id: Option<u64>,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
