//! Command Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A command error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command execution.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not list {}", _0.display())]
    Browse(#[error(not(source))] PathBuf),
    #[display("could not tag {}", _0.display())]
    Tag(#[error(not(source))] PathBuf),
    #[display("could not write output")]
    Output,
}
