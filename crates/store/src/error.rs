//! Store Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. The underlying `sqlx` or I/O error is kept as a child
//! frame; the [`ErrorKind`] on top says what the caller should do about it.

use derive_more::{Display, Error};
use exn::Exn;
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SQLite primary result code for "unable to open database file".
const SQLITE_CANTOPEN: i32 = 14;

/// Actionable error categories.
///
/// ### Expected
/// - [`ErrorKind::NoMetadata`]: the directory has never been tagged. Callers
///   listing a directory should treat this as "no tags", not as a failure.
///
/// ### Fatal to the current operation
/// - [`ErrorKind::Storage`]
/// - [`ErrorKind::Filesystem`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No store file exists for the directory.
    #[display("no metadata store: {}", _0.display())]
    NoMetadata(#[error(not(source))] PathBuf),
    /// A statement or query against an existing store failed.
    #[display("metadata store error: {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
    /// The store path could not be inspected.
    #[display("filesystem error: {}", _0.display())]
    Filesystem(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if the directory simply has no store yet.
    pub fn is_no_metadata(&self) -> bool {
        matches!(self, Self::NoMetadata(_))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Folds [`ErrorKind::NoMetadata`] into an empty value.
///
/// ```no_run
/// use filetag_store::{MetadataStore, NoMetadataExt};
///
/// # async fn example() -> filetag_store::error::Result<()> {
/// let mut store = MetadataStore::new("/some/dir", ".tag");
/// let tags = store.tags_for_file("a.txt").await.or_empty()?;
/// # Ok(())
/// # }
/// ```
pub trait NoMetadataExt<T> {
    fn or_empty(self) -> Result<T>;
}

impl<T: Default> NoMetadataExt<T> for Result<T> {
    fn or_empty(self) -> Result<T> {
        match self {
            Err(err) if err.is_no_metadata() => Ok(T::default()),
            other => other,
        }
    }
}

/// Whether a database error means "there is no store here".
///
/// Covers a missing file surfacing from the driver's I/O layer and an empty
/// single-row fetch. `SQLITE_CANTOPEN` is not included: SQLite also reports it
/// for files that exist but cannot be read (see [`is_cant_open`]).
pub(crate) fn is_absent_store(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::RowNotFound => true,
        sqlx::Error::Io(io) => io.kind() == IoErrorKind::NotFound,
        _ => false,
    }
}

/// Whether SQLite failed to open the file at all (any extended code whose
/// primary code is `SQLITE_CANTOPEN`).
pub(crate) fn is_cant_open(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| code & 0xff == SQLITE_CANTOPEN),
        _ => false,
    }
}

/// Raise a database error as either [`ErrorKind::NoMetadata`] or
/// [`ErrorKind::Storage`], keeping the original error in the tree.
#[track_caller]
pub(crate) fn classify_sqlx(err: sqlx::Error, path: &Path) -> Error {
    let kind = if is_absent_store(&err) {
        ErrorKind::NoMetadata(path.to_path_buf())
    } else {
        ErrorKind::Storage(path.to_path_buf())
    };
    Exn::from(err).raise(kind)
}

/// Raise a database error as [`ErrorKind::Storage`] regardless of its cause.
///
/// Used on write paths, where failing to open the file is a real failure and
/// not a sign of an untagged directory.
#[track_caller]
pub(crate) fn storage_error(err: sqlx::Error, path: &Path) -> Error {
    Exn::from(err).raise(ErrorKind::Storage(path.to_path_buf()))
}

/// Raise a filesystem error as either [`ErrorKind::NoMetadata`] or
/// [`ErrorKind::Filesystem`].
#[track_caller]
pub(crate) fn classify_io(err: IoError, path: &Path) -> Error {
    let kind = match err.kind() {
        IoErrorKind::NotFound => ErrorKind::NoMetadata(path.to_path_buf()),
        _ => ErrorKind::Filesystem(path.to_path_buf()),
    };
    Exn::from(err).raise(kind)
}
