//! Error types for the mention-scout server.

/// Top-level error type for starting and running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error (file contents or values).
    #[error("config error: {0}")]
    Config(String),

    /// Search core rejected its configuration.
    #[error(transparent)]
    Search(#[from] mention_search::SearchError),

    /// The listener could not be bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServerError>;
