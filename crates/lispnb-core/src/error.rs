//! Error types for lispnb-core.

use thiserror::Error;

/// Result type for lispnb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lispnb-core.
#[derive(Debug, Error)]
pub enum Error {
    /// Notebook format configuration is unusable.
    #[error("invalid notebook format: {0}")]
    InvalidFormat(String),

    /// A form span breaks the ordering or bounds contract.
    #[error("invalid form span: {0}")]
    InvalidSpan(String),
}
