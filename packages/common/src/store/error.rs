use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    /// The store reached the backend but the operation failed.
    #[error("record store operation failed: {0}")]
    Backend(String),
}
