//! Error types for tfplug

use std::time::Duration;

/// Error type for tfplug operations
#[derive(Debug, thiserror::Error)]
pub enum TfplugError {
    #[error("Resource type not found: {0}")]
    ResourceNotFound(String),

    #[error("Data source type not found: {0}")]
    DataSourceNotFound(String),

    #[error("Type name registered more than once: {0}")]
    DuplicateTypeName(String),

    #[error("Provider not configured")]
    ProviderNotConfigured,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A static attribute validator rejected the configuration
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Mutually exclusive attributes, exactly-one groups, or a change that
    /// cannot be applied in place
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The remote object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport, timeout or server-side failure reported by the remote API
    #[error("Remote API error: {0}")]
    Remote(String),

    #[error("The imported ID ({id}) does not match the format ({template})")]
    MalformedImportId { id: String, template: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },

    #[error("{0} was cancelled")]
    Cancelled(String),

    #[error("{0} does not support in-place updates")]
    UpdateNotSupported(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl TfplugError {
    /// Not-found errors are absorbed by read and delete instead of failing them
    pub fn is_not_found(&self) -> bool {
        matches!(self, TfplugError::NotFound(_))
    }
}

/// Result type alias for tfplug operations
pub type Result<T> = std::result::Result<T, TfplugError>;

impl From<String> for TfplugError {
    fn from(s: String) -> Self {
        TfplugError::Custom(s)
    }
}

impl From<&str> for TfplugError {
    fn from(s: &str) -> Self {
        TfplugError::Custom(s.to_string())
    }
}
