//! Metadata source error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for metadata source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while reading mappings out of a metadata source.
///
/// These never reach API callers: the reader logs them and skips the
/// offending entity.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read a mapping file.
    #[error("failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse a TOML mapping file.
    #[error("failed to parse mapping file: {0}")]
    Toml(#[from] toml::de::Error),

    /// SQLite introspection failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A declared field has no mapping.
    #[error("no mapping found for field '{field}' of entity '{entity}'")]
    MappingNotFound { entity: String, field: String },

    /// A mapping exists but cannot be interpreted.
    #[error("invalid mapping on entity '{entity}': {message}")]
    InvalidMapping { entity: String, message: String },

    /// An association points at an entity the source does not know.
    #[error("entity '{0}' is not known to the metadata source")]
    UnknownEntity(String),
}

impl SourceError {
    /// Create an invalid-mapping error.
    pub fn invalid(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMapping {
            entity: entity.into(),
            message: message.into(),
        }
    }
}
