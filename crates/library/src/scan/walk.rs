use crate::error::{ErrorKind, Result};
use crate::scan::{Listing, TaggedEntry};
use exn::{Exn, ResultExt};
use filetag_store::{MetadataStore, NoMetadataExt};
use std::path::Path;
use tokio::fs::{self, DirEntry};

enum WalkEntry {
    File(String),
    /// A file whose name cannot key the store; listed by its lossy name.
    Unkeyed(String),
    Skip,
}

fn filesystem_error(err: std::io::Error, path: &Path) -> crate::error::Error {
    Exn::from(err).raise(ErrorKind::Filesystem(path.to_path_buf()))
}

/// List the files directly inside the store's directory.
///
/// Directories, hidden entries (leading `.`) and the store file itself are
/// left out; symlinks count as the file they point to. Names that are not
/// valid UTF-8 are listed lossily with empty metadata. Entries come back in
/// whatever order the filesystem enumerates them.
///
/// A directory that was never tagged lists every file with empty metadata.
/// Any other failure stops the walk: the listing then holds the entries
/// gathered so far plus the error. The store is closed before returning
/// either way.
pub async fn list_files(mut store: MetadataStore) -> Listing {
    let mut entries = Vec::new();
    let walked = walk(&mut store, &mut entries).await;
    let closed = store.close().await.or_raise(|| ErrorKind::Store);
    let error = match (walked, closed) {
        (Err(err), Err(close_err)) => {
            tracing::warn!(root = %store.root().display(), error = ?close_err, "Failed to close metadata store after failed listing");
            Some(err)
        },
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Some(err),
        (Ok(()), Ok(())) => None,
    };
    tracing::debug!(root = %store.root().display(), entries = entries.len(), complete = error.is_none(), "Directory listed");
    Listing { entries, error }
}

async fn walk(store: &mut MetadataStore, entries: &mut Vec<TaggedEntry>) -> Result<()> {
    let root = store.root().to_path_buf();
    let mut dir = fs::read_dir(&root).await.map_err(|e| filesystem_error(e, &root))?;
    while let Some(entry) = dir.next_entry().await.map_err(|e| filesystem_error(e, &root))? {
        let name = match process_entry(&entry, store.tag_file()).await? {
            WalkEntry::File(name) => name,
            WalkEntry::Unkeyed(name) => {
                entries.push(TaggedEntry { name, ..TaggedEntry::default() });
                continue;
            },
            WalkEntry::Skip => continue,
        };
        let tags = store.tags_for_file(&name).await.or_empty().or_raise(|| ErrorKind::Store)?;
        let description = store.description_for_file(&name).await.or_empty().or_raise(|| ErrorKind::Store)?;
        entries.push(TaggedEntry { name, tags, description, is_dir: false });
    }
    Ok(())
}

async fn process_entry(entry: &DirEntry, tag_file: &str) -> Result<WalkEntry> {
    let path = entry.path();
    let (name, keyed) = match entry.file_name().into_string() {
        Ok(name) => (name, true),
        Err(raw) => (raw.to_string_lossy().into_owned(), false),
    };
    if name == tag_file || name.starts_with('.') {
        return Ok(WalkEntry::Skip);
    }
    let file_type = entry.file_type().await.map_err(|e| filesystem_error(e, &path))?;
    let is_file = if file_type.is_symlink() {
        match fs::metadata(&path).await {
            Ok(metadata) => metadata.is_file(),
            // Dangling symlink.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => return Err(filesystem_error(err, &path)),
        }
    } else {
        file_type.is_file()
    };
    if !is_file {
        tracing::trace!(path = %path.display(), "Skipping directory or special file");
        return Ok(WalkEntry::Skip);
    }
    if !keyed {
        // Store keys are text; there is no way to look this one up.
        tracing::warn!(path = %path.display(), "Listing file with a non UTF-8 name without metadata");
        return Ok(WalkEntry::Unkeyed(name));
    }
    Ok(WalkEntry::File(name))
}
