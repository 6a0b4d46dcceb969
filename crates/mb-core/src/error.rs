//! # AppError
//!
//! Centralized error handling for msgboard.
//! Maps lookup and persistence failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all mb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Thread, Reply)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Persistence failure (e.g., DB down, corrupt document)
    #[error("store failure: {0}")]
    StoreFailure(String),

    /// The store did not answer within the configured timeout
    #[error("store timed out: {0}")]
    StoreTimeout(String),
}

impl AppError {
    pub fn thread_not_found(id: Uuid) -> Self {
        AppError::NotFound("thread".to_string(), id.to_string())
    }

    pub fn reply_not_found(id: Uuid) -> Self {
        AppError::NotFound("reply".to_string(), id.to_string())
    }
}

/// A specialized Result type for msgboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
