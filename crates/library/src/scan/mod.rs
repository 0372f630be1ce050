//! Listing a directory together with the metadata of its files.

mod listing;
mod walk;

pub use self::listing::{Listing, TaggedEntry};
pub use self::walk::list_files;
