//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Store failures are kept as child
//! frames, so the original [`filetag_store::error::ErrorKind`] can still be
//! found in the tree.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Listing the directory (or inspecting one of its entries) failed.
    #[display("could not read directory: {}", _0.display())]
    Filesystem(#[error(not(source))] PathBuf),
    /// Reading or writing the directory's metadata store failed.
    #[display("metadata store failure")]
    Store,
    /// The path does not name a file that can be tagged.
    #[display("not a taggable file path: {}", _0.display())]
    InvalidTarget(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
