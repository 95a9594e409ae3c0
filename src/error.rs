//! Error handling module for the bundle engine
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the crate should use these types for consistency.

use thiserror::Error;

/// Main error type for the bundle engine
#[derive(Error, Debug)]
pub enum FbtError {
    /// Malformed inbound request (missing required field, bad shape)
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Settings errors (unknown keys, unparsable values)
    #[error("Settings error: {0}")]
    Settings(String),

    /// Catalog errors (loading, parsing)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Cart mutation errors
    #[error("Cart error: {0}")]
    Cart(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors (catalog/settings files in the demo binary)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for bundle engine operations
pub type Result<T> = std::result::Result<T, FbtError>;

// Convenient error constructors
impl FbtError {
    /// Create a malformed-request error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a cart error
    pub fn cart(msg: impl Into<String>) -> Self {
        Self::Cart(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
