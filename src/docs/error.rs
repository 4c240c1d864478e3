//! Error types for catalog building and loading.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

/// Errors that can occur while building, writing, or loading the catalog.
///
/// Extraction misses are not errors; extractors return empty values instead.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to read a source, demo, or catalog file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the catalog.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to list a directory.
    #[error("Failed to read directory: {path}")]
    DirectoryRead {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The components directory does not exist.
    #[error("Components directory not found: {path}")]
    ComponentsDirMissing {
        /// Path that was expected to hold component directories.
        path: PathBuf,
    },

    /// A discovery pattern could not be compiled.
    #[error("Invalid discovery pattern: {pattern}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// The persisted catalog is not valid JSON for a catalog.
    #[error("Failed to parse catalog: {path}")]
    CatalogParse {
        /// Path to the catalog.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The catalog could not be serialised.
    #[error("Failed to serialise catalog")]
    CatalogSerialise {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl DocsError {
    /// Creates a file read error.
    pub fn file_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a directory read error.
    pub fn directory_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::DirectoryRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
