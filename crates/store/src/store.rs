//! The per-directory metadata store.

use crate::db::{self, Access};
use crate::error::{ErrorKind, Result, classify_sqlx, storage_error};
use sqlx::Connection;
use sqlx::sqlite::SqliteConnection;
use std::path::{Path, PathBuf};

/// Tags and descriptions for the files of one directory.
///
/// The store is bound to a single `(directory, store file name)` pair and
/// keys everything by the file's base name. Renaming or moving a file
/// therefore loses its metadata; two files with the same name in different
/// directories never collide because each directory has its own store.
///
/// # Lifecycle
///
/// Nothing is opened on construction. The first call opens a connection and
/// every later call reuses it until [`refresh`](Self::refresh) or
/// [`close`](Self::close). Reads never create the store file: if it is
/// missing they fail with [`ErrorKind::NoMetadata`]. Writes create the file
/// and its schema on demand.
///
/// There is no application-level locking. Two processes writing to the same
/// directory at once rely entirely on SQLite's file locking.
#[derive(Debug)]
pub struct MetadataStore {
    root: PathBuf,
    tag_file: String,
    vacuum: bool,
    conn: Option<SqliteConnection>,
}

impl MetadataStore {
    pub fn new(root: impl Into<PathBuf>, tag_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tag_file: tag_file.into(),
            vacuum: false,
            conn: None,
        }
    }

    /// Compact the store file each time a connection is opened.
    pub fn with_vacuum(mut self, vacuum: bool) -> Self {
        self.vacuum = vacuum;
        self
    }

    /// The directory this store describes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the store file inside [`root`](Self::root).
    pub fn tag_file(&self) -> &str {
        &self.tag_file
    }

    /// Full path of the store file.
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.tag_file)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    async fn connection(&mut self, access: Access) -> Result<&mut SqliteConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let path = self.path();
                if access == Access::Read && !db::store_exists(&path).await? {
                    exn::bail!(ErrorKind::NoMetadata(path));
                }
                db::open(&path, access, self.vacuum).await?
            },
        };
        Ok(self.conn.insert(conn))
    }

    /// All tags recorded for `name`, in the order they were added.
    ///
    /// Duplicates are returned as stored.
    pub async fn tags_for_file(&mut self, name: &str) -> Result<Vec<String>> {
        let path = self.path();
        let conn = self.connection(Access::Read).await?;
        sqlx::query_scalar::<_, String>("SELECT tag FROM tags WHERE name = ? ORDER BY rowid")
            .bind(name)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| classify_sqlx(e, &path))
    }

    /// The description recorded for `name`, or an empty string.
    pub async fn description_for_file(&mut self, name: &str) -> Result<String> {
        let path = self.path();
        let conn = self.connection(Access::Read).await?;
        let desc = sqlx::query_scalar::<_, Option<String>>("SELECT desc FROM desc WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| classify_sqlx(e, &path))?;
        Ok(desc.flatten().unwrap_or_default())
    }

    /// Append one row per tag for `name`.
    ///
    /// Tags already present are added again; nothing is merged. An empty
    /// slice does not touch (or create) the store.
    pub async fn set_tags_for_file<T: AsRef<str>>(&mut self, name: &str, tags: &[T]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let path = self.path();
        let conn = self.connection(Access::Write).await?;
        let mut tx = conn.begin().await.map_err(|e| storage_error(e, &path))?;
        for tag in tags {
            sqlx::query("INSERT INTO tags (name, tag) VALUES (?, ?)")
                .bind(name)
                .bind(tag.as_ref())
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error(e, &path))?;
        }
        tx.commit().await.map_err(|e| storage_error(e, &path))
    }

    /// Set (or replace) the description for `name`.
    ///
    /// An empty description is ignored and leaves any existing one in place.
    pub async fn set_description_for_file(&mut self, name: &str, description: &str) -> Result<()> {
        if description.is_empty() {
            return Ok(());
        }
        let path = self.path();
        let conn = self.connection(Access::Write).await?;
        sqlx::query("INSERT INTO desc (name, desc) VALUES (?, ?) ON CONFLICT(name) DO UPDATE SET desc = excluded.desc")
            .bind(name)
            .bind(description)
            .execute(&mut *conn)
            .await
            .map_err(|e| storage_error(e, &path))?;
        Ok(())
    }

    /// Drop the current connection so the next call opens a fresh one.
    pub async fn refresh(&mut self) -> Result<()> {
        self.close().await
    }

    /// Close the connection, if one is open. Safe to call repeatedly.
    pub async fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            Some(conn) => conn.close().await.map_err(|e| storage_error(e, &self.path())),
            None => Ok(()),
        }
    }
}
