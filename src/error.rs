//! Error types shared across the crate

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the site utilities
#[derive(Debug, Error)]
pub enum ColdReadsError {
    /// A caller passed a value outside the operation's domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The key-value store rejected a read or write
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored value could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A date string could not be parsed
    #[error("Invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

impl ColdReadsError {
    /// Check if this error was caused by the caller rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ColdReadsError::InvalidArgument(_) | ColdReadsError::Date(_))
    }
}

/// Result alias used by library operations
pub type Result<T> = std::result::Result<T, ColdReadsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_caller_error() {
        let err = ColdReadsError::InvalidArgument("total must be positive".into());
        assert!(err.is_caller_error());
        assert_eq!(err.to_string(), "Invalid argument: total must be positive");
    }

    #[test]
    fn storage_error_is_not_caller_error() {
        let err = ColdReadsError::from(StorageError::Unavailable("quota".into()));
        assert!(!err.is_caller_error());
    }
}
