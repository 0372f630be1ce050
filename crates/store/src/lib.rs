//! Per-directory SQLite store for file tags and descriptions.
//!
//! Every tagged directory carries its own small database file (by default a
//! hidden `.tag`) holding two relations keyed by base file name:
//!
//! - `tags(name, tag)`: append-only, duplicates allowed, read back in
//!   insertion order.
//! - `desc(name PRIMARY KEY, desc)`: one description per file, replaced on
//!   every non-empty write.
//!
//! A directory that has never been tagged has no store file at all. Reading
//! from it reports [`ErrorKind::NoMetadata`](error::ErrorKind::NoMetadata)
//! instead of creating anything, so listings can tell "nothing tagged here"
//! apart from a broken database.

mod db;
pub mod error;
mod store;

pub use crate::error::NoMetadataExt;
pub use crate::store::MetadataStore;

/// Store file name used when none is configured.
pub const DEFAULT_TAG_FILE: &str = ".tag";
