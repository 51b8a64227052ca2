//! Typed error handling for the sift framework
//!
//! Callers can match specific categories instead of dealing with a generic
//! `anyhow::Error`:
//!
//! - [`ConfigError`]: block configuration and registry wiring problems
//! - [`TypeError`]: content-type metadata resolution failures
//! - [`StorageError`]: data-store backend faults
//!
//! Malformed user input (stray delimiters, non-numeric id tokens, empty
//! request parameters) is never an error at this layer: handlers degrade to
//! fewer or no filter conditions instead of failing the request.

use std::fmt;

/// The main error type for the sift framework
#[derive(Debug)]
pub enum SiftError {
    /// Configuration and registry wiring errors
    Config(ConfigError),

    /// Content-type resolution errors
    Type(TypeError),

    /// Storage backend errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiftError::Config(e) => write!(f, "{}", e),
            SiftError::Type(e) => write!(f, "{}", e),
            SiftError::Storage(e) => write!(f, "{}", e),
            SiftError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiftError::Config(e) => Some(e),
            SiftError::Type(e) => Some(e),
            SiftError::Storage(e) => Some(e),
            SiftError::Internal(_) => None,
        }
    }
}

impl SiftError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SiftError::Config(e) => e.error_code(),
            SiftError::Type(e) => e.error_code(),
            SiftError::Storage(e) => e.error_code(),
            SiftError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and registry wiring
#[derive(Debug)]
pub enum ConfigError {
    /// No repository is registered for the requested content type
    ///
    /// Fatal to the current block render: without a repository nothing
    /// meaningful can be returned.
    RepositoryNotRegistered { content_type: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RepositoryNotRegistered { content_type } => {
                write!(
                    f,
                    "No repository registered for content type '{}'",
                    content_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::RepositoryNotRegistered { .. } => "REPOSITORY_NOT_REGISTERED",
        }
    }
}

impl From<ConfigError> for SiftError {
    fn from(err: ConfigError) -> Self {
        SiftError::Config(err)
    }
}

// =============================================================================
// Type Errors
// =============================================================================

/// Errors related to content-type metadata resolution
#[derive(Debug)]
pub enum TypeError {
    /// The type provider knows no type with this identifier
    NotFound { type_id: String },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::NotFound { type_id } => {
                write!(f, "Content type '{}' not found", type_id)
            }
        }
    }
}

impl std::error::Error for TypeError {}

impl TypeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TypeError::NotFound { .. } => "CONTENT_TYPE_NOT_FOUND",
        }
    }
}

impl From<TypeError> for SiftError {
    fn from(err: TypeError) -> Self {
        SiftError::Type(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Query execution failed
    QueryError { backend: String, message: String },

    /// A shared store lock was poisoned
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::LockPoisoned { message } => {
                write!(f, "Store lock poisoned: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::LockPoisoned { .. } => "STORAGE_LOCK_POISONED",
        }
    }
}

impl From<StorageError> for SiftError {
    fn from(err: StorageError) -> Self {
        SiftError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        SiftError::Internal(format!("serialization failed: {}", err))
    }
}

/// Convert from anyhow::Error produced inside storage backends
impl From<anyhow::Error> for SiftError {
    fn from(err: anyhow::Error) -> Self {
        SiftError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for sift operations
pub type SiftResult<T> = Result<T, SiftError>;

// =============================================================================
// Tests
// =============================================================================
