//! Connection setup and schema for a single store file.

use crate::error::{Error, ErrorKind, Result, classify_io, classify_sqlx, is_cant_open, storage_error};
use exn::Exn;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use std::time::Duration;

const CREATE_TAGS: &str = "CREATE TABLE IF NOT EXISTS tags (name text, tag varchar(50))";
const CREATE_DESC: &str = "CREATE TABLE IF NOT EXISTS desc (name text PRIMARY KEY, desc text)";

/// What the caller intends to do with the connection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Access {
    /// Never creates the store file.
    Read,
    /// Creates the store file if missing.
    Write,
}

fn options(path: &Path, access: Access) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(access == Access::Write)
        // Rollback journal: nothing but the store file itself is left behind
        // in the tagged directory once the connection closes.
        .journal_mode(SqliteJournalMode::Delete)
        .synchronous(SqliteSynchronous::Normal)
        // Another invocation tagging the same directory holds the write lock
        // for a few milliseconds at most.
        .busy_timeout(Duration::from_millis(1500))
}

/// Whether a store file exists at `path`.
///
/// A directory sitting at the store path counts as "no store".
pub(crate) async fn store_exists(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(!metadata.is_dir()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(classify_io(err, path)),
    }
}

/// Open a connection to the store at `path` and make sure the schema exists.
///
/// For [`Access::Read`] the caller is expected to have checked
/// [`store_exists`] first. A file disappearing in between still surfaces as
/// `NoMetadata`; a file that is present but cannot be opened is `Storage`.
pub(crate) async fn open(path: &Path, access: Access, vacuum: bool) -> Result<SqliteConnection> {
    let mut conn = match options(path, access).connect().await {
        Ok(conn) => conn,
        Err(err) => return Err(open_error(err, path, access).await),
    };
    if let Err(err) = initialize(&mut conn, vacuum).await {
        // The connection is useless without a schema; the initialization
        // error is the one worth reporting.
        _ = conn.close().await;
        return Err(match access {
            Access::Read => classify_sqlx(err, path),
            Access::Write => storage_error(err, path),
        });
    }
    Ok(conn)
}

async fn open_error(err: sqlx::Error, path: &Path, access: Access) -> Error {
    match access {
        Access::Write => storage_error(err, path),
        Access::Read if is_cant_open(&err) => match store_exists(path).await {
            Ok(false) => Exn::from(err).raise(ErrorKind::NoMetadata(path.to_path_buf())),
            _ => storage_error(err, path),
        },
        Access::Read => classify_sqlx(err, path),
    }
}

async fn initialize(conn: &mut SqliteConnection, vacuum: bool) -> sqlx::Result<()> {
    if vacuum {
        sqlx::query("VACUUM").execute(&mut *conn).await?;
    }
    sqlx::query(CREATE_TAGS).execute(&mut *conn).await?;
    sqlx::query(CREATE_DESC).execute(&mut *conn).await?;
    Ok(())
}
