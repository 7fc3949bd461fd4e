//! Delegation errors

/// Result type for delegation setup
pub type DelegateResult<T> = Result<T, DelegateError>;

/// Delegation errors
///
/// Only container resolution can fail; every other anomaly is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegateError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}
