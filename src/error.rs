//! Error types for sequence construction and consumption
//!
//! Every variant describes a programmer mistake. The panicking entry points
//! (`slice`, `once`, `zip_with_config`) use the `Display` text of these
//! variants so the failure names the violated precondition.

use thiserror::Error;

/// Main error type for lazyseq operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// A slice was requested with a step of zero
    #[error("invalid argument: slice step must be positive, got {step}")]
    InvalidStep { step: usize },
    /// A zip handoff channel was configured with no capacity
    #[error("invalid argument: zip handoff capacity must be positive, got {capacity}")]
    InvalidHandoffCapacity { capacity: usize },
    /// A `once` sequence was driven a second time
    #[error("sequence can only be iterated once")]
    AlreadyConsumed,
}

/// Result type for lazyseq operations
pub type SeqResult<T> = Result<T, SeqError>;
