//! Storage infrastructure: YAML config file persistence.
//!
//! This module provides a thin adapter between stores and the file system.
//! The `config_file` sub-module handles:
//!
//! - Seeding the on-disk copy from a bundled resource on first run.
//! - Reading and parsing the on-disk copy.
//! - Writing changes back to disk.
//!
//! Keeping storage concerns here means the store itself never touches
//! `std::fs` directly.

use std::path::PathBuf;

use cfgstore_core::DocumentError;
use thiserror::Error;

pub mod config_file;

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource provider has no resource at this path.
    #[error("bundled resource '{path}' not found")]
    MissingResource { path: String },

    /// The document could not be parsed or rendered.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Builds a `map_err` adapter that tags an I/O error with its path.
pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.into();
    move |source| StorageError::Io { path, source }
}
