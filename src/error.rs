use thiserror::Error;

/// Validator error types.
///
/// Local, recoverable conditions (an asset missing from the catalog, a single
/// item failing a check) are converted into boolean/`Resolution` outcomes by
/// their callers; the variants here are the conditions that terminate the
/// current operation.
#[derive(Error, Debug)]
pub enum Error {
    /// An id-based lookup found no record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request or record breaks a schema or business invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transport collaborator failed (network/HTTP error).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// An id obtained from an internal list is missing on a subsequent find.
    /// The repositories are process-local and single-writer, so this is
    /// unreachable in a correct build; it is fatal and never retried.
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalConsistency(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, Error>;
