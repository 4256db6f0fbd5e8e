use std::path::PathBuf;

/// Errors from collection persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing resource could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing resource exists but does not hold a valid collection.
    #[error("corrupt collection in {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The collection could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A blocking write task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
