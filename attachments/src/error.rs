//! Error types for the Attachments context

use attachments_config::ConfigError;
use thiserror::Error;

/// Result type for Attachments operations
pub type Result<T> = std::result::Result<T, AttachmentsError>;

/// Errors surfaced by the Attachments context.
///
/// Registry operations themselves never fail; these cover loading
/// configuration and addressing instances by name.
#[derive(Debug, Error)]
pub enum AttachmentsError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No instance is registered under this name
    #[error("instance not found: {name}")]
    InstanceNotFound { name: String },
}
