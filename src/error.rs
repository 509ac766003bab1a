use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, converting or writing a character graph
#[derive(Error, Debug)]
pub enum RelgraphError {
    /// Input spreadsheet does not exist
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Input exists but could not be parsed as a table
    #[error("Source unreadable: {}: {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// A configured column header is not present in the table
    #[error("Field missing: no column named {0:?}")]
    FieldMissing(String),

    /// Two different characters registered the same name variant
    #[error("Name collision: {name:?} already maps to {kept:?}, refusing {rejected:?}")]
    NameCollision {
        name: String,
        kept: String,
        rejected: String,
    },

    /// Book file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelgraphError>;
