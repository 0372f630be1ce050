//! Directory listings joined with their tags, and single-file tagging.
//!
//! [`Tagger`] is the front door: it lists a directory's files along with the
//! tags and description stored for each, and writes tags or a description
//! for a single file. Metadata lives in a per-directory store managed by
//! [`filetag_store`].

pub mod error;
pub mod scan;
mod tag;

pub use crate::scan::{Listing, TaggedEntry};
pub use crate::tag::Tagger;
pub use filetag_store::DEFAULT_TAG_FILE;
