//! Error types for cheatsheet operations

use thiserror::Error;
use uuid::Uuid;

/// Rejected input at the mutation boundary. No state is changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("content must not be empty")]
    EmptyContent,
}

/// Bulk import payload could not be decoded. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Malformed bytes: not UTF-8, not JSON, or truncated
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// Well-formed JSON that is not an array of `{name, prompt}` objects
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Underlying store failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("store is read-only")]
    ReadOnly,
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Load or save through the storage backend failed
    #[error("storage error: {0}")]
    Persistence(#[from] StorageError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("copy to clipboard failed")]
    Clipboard,
    #[error("category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("command not found: {0}")]
    CommandNotFound(Uuid),
    #[error("library is not empty")]
    NotEmpty,
}

pub type Result<T, E = SheetError> = std::result::Result<T, E>;
