//! Error types for field type loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while loading a field type from an external source.
///
/// These never escape registry bootstrap: the registry logs them and skips
/// the offending key.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// The source locator does not point at anything
    #[error("field type source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The source exists but does not describe a usable field type
    #[error("invalid field type definition in {path}: {message}")]
    InvalidDefinition { path: PathBuf, message: String },

    /// The loader does not understand this kind of source. Raised by custom
    /// loaders that only handle some [`FieldTypeSource`](crate::FieldTypeSource)
    /// variants.
    #[error("unsupported field type source for '{key}'")]
    UnsupportedSource { key: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
