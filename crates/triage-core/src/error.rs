use thiserror::Error;

/// Request rejected before any backend is consulted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    EmptyText,
}
