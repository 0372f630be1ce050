use crate::error::{ErrorKind, Result};
use crate::scan::{self, Listing};
use exn::{OptionExt, ResultExt};
use filetag_store::{DEFAULT_TAG_FILE, MetadataStore};
use std::path::{Path, PathBuf};

/// Entry point for listing and tagging files.
///
/// Every call binds a fresh [`MetadataStore`] to the directory it concerns
/// and closes it again before returning, so a `Tagger` holds no open
/// handles between calls and can be freely cloned.
#[derive(Clone, Debug)]
pub struct Tagger {
    tag_file: String,
    vacuum: bool,
}

impl Default for Tagger {
    fn default() -> Self {
        Self { tag_file: DEFAULT_TAG_FILE.to_string(), vacuum: false }
    }
}

impl Tagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different store file name in every directory.
    pub fn with_tag_file(mut self, tag_file: impl Into<String>) -> Self {
        self.tag_file = tag_file.into();
        self
    }

    /// Compact each store when it is opened.
    pub fn with_vacuum(mut self, vacuum: bool) -> Self {
        self.vacuum = vacuum;
        self
    }

    pub fn tag_file_name(&self) -> &str {
        &self.tag_file
    }

    fn store(&self, root: impl Into<PathBuf>) -> MetadataStore {
        MetadataStore::new(root, self.tag_file.clone()).with_vacuum(self.vacuum)
    }

    /// Split a file path into the directory holding its store and the name
    /// it is keyed by. A bare file name lives in the current directory.
    fn split_target(&self, path: &Path) -> Result<(PathBuf, String)> {
        let invalid = || ErrorKind::InvalidTarget(path.to_path_buf());
        let name = path.file_name().ok_or_raise(invalid)?.to_str().ok_or_raise(invalid)?.to_string();
        if name == self.tag_file {
            exn::bail!(invalid());
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((dir, name))
    }

    /// List the files of `root` with their tags and descriptions.
    ///
    /// See [`scan::list_files`].
    pub async fn list_files(&self, root: impl AsRef<Path>) -> Listing {
        scan::list_files(self.store(root.as_ref())).await
    }

    /// Add `tags` to the file at `path`. An empty slice writes nothing.
    pub async fn tag_file<T: AsRef<str>>(&self, path: impl AsRef<Path>, tags: &[T]) -> Result<()> {
        let (dir, name) = self.split_target(path.as_ref())?;
        let mut store = self.store(dir);
        let written = store.set_tags_for_file(&name, tags).await;
        finish(store, written).await
    }

    /// Set the description of the file at `path`. An empty description
    /// writes nothing.
    pub async fn set_description(&self, path: impl AsRef<Path>, description: &str) -> Result<()> {
        let (dir, name) = self.split_target(path.as_ref())?;
        let mut store = self.store(dir);
        let written = store.set_description_for_file(&name, description).await;
        finish(store, written).await
    }
}

/// Close the store after a write, reporting the write failure first.
async fn finish(mut store: MetadataStore, written: filetag_store::error::Result<()>) -> Result<()> {
    let closed = store.close().await;
    match written {
        Err(err) => {
            if let Err(close_err) = closed {
                tracing::warn!(store = %store.path().display(), error = ?close_err, "Failed to close metadata store after failed write");
            }
            Err(err.raise(ErrorKind::Store))
        },
        Ok(()) => closed.or_raise(|| ErrorKind::Store),
    }
}
