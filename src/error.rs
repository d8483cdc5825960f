//! Error types for sidecar serialization and output.
//!
//! Building a sidecar cannot fail; only turning it into bytes and putting
//! those bytes on disk can. Callers at the binary boundary wrap these in
//! `anyhow` for reporting.

use std::path::PathBuf;

/// Result type for sidecar output operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while serializing or writing a sidecar.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Writing the destination file failed (missing parent, permissions).
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file could not be moved over the destination.
    #[error("failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize sidecar: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error tied to the path being written.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying IO error kind, if this is an IO failure.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } | Self::Persist { source, .. } => Some(source.kind()),
            Self::Serialize(_) => None,
        }
    }
}
