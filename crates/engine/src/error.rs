//! Error types for the engine crate.
//!
//! Only a comparison can fail. A recommendation query without a match is
//! not an error: it returns an empty `Recommendation`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Too few titles survived resolution for a comparison
    #[error("Need at least {required} resolved titles to compare, got {resolved}")]
    InsufficientInput { resolved: usize, required: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
