//! Error types for validation and record conversion.
//!
//! # Design
//! `ValidationError` covers client input that is rejected before any store
//! access. Its `Display` text is the human-readable message returned to the
//! client. `CodecError` is raised when a stored document cannot be turned
//! back into a wire record; it points at bad data in the store, not at the
//! caller.

use thiserror::Error;

/// Client input rejected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `title` field was absent or empty.
    #[error("title is required")]
    TitleRequired,

    /// The id does not parse as a UUID.
    #[error("given id is not valid")]
    InvalidId,
}

/// A stored document could not be converted into a `Todo`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("stored record has malformed id {0:?}")]
    MalformedId(String),
}
