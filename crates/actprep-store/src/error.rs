//! Store error types.
//!
//! These represent failures when pushing records to or reading records
//! from the external store. All of them are non-fatal to session state:
//! callers log them and the in-memory session continues as the source of
//! truth.

use thiserror::Error;

/// Errors that can occur when talking to a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API rejected the key (401/403).
    #[error("store authorization failed: {0}")]
    Unauthorized(String),

    /// The API returned an error response.
    #[error("store API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("store request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("store network error: {0}")]
    Network(String),
}

impl StoreError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, StoreError::Unauthorized(_))
    }
}
