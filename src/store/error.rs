//! Repository error taxonomy.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by item repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was missing or empty on creation.
    #[error("Name and description are required")]
    Validation,

    /// No item carries the requested id.
    #[error("Item not found")]
    NotFound(u64),
}
