//! Persistence port contracts and blob store implementations.
//!
//! # Responsibility
//! - Define the durable key-value blob port consumed by the note store.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `write_blob` replaces the whole value for a key; there are no partial writes.
//! - `read_blob` returns `Ok(None)` for absent keys, never an empty blob.

use crate::db::{open_db, open_db_in_memory, DbError};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Fixed namespaced key under which the note collection is stored.
pub const NOTES_BLOB_KEY: &str = "zenith.notes.v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by blob port implementations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage engine failure.
    Db(DbError),
    /// Collection could not be encoded for writing.
    Encode(String),
    /// Backend refused the operation (offline, quota, simulated failure).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(message) => write!(f, "failed to encode blob: {message}"),
            Self::Unavailable(message) => write!(f, "blob store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value blob port supplied by the host environment.
pub trait BlobStore {
    /// Reads the blob stored under `key`, if any.
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    /// Replaces the blob stored under `key`.
    fn write_blob(&mut self, key: &str, bytes: &[u8]) -> RepoResult<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        (**self).read_blob(key)
    }

    fn write_blob(&mut self, key: &str, bytes: &[u8]) -> RepoResult<()> {
        (**self).write_blob(key, bytes)
    }
}

/// Process-local blob store, mainly for tests and ephemeral hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw blob, bypassing encoding.
    pub fn with_blob(mut self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(key.to_string(), bytes.into());
        self
    }

    /// Makes subsequent writes fail with `RepoError::Unavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Returns the raw bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.blobs.get(key).map(Vec::as_slice)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write_blob(&mut self, key: &str, bytes: &[u8]) -> RepoResult<()> {
        if self.fail_writes {
            return Err(RepoError::Unavailable("writes disabled".to_string()));
        }
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// SQLite-backed blob store over the `blobs` table.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Ok(Self { conn })
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Exposes the underlying connection for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl BlobStore for SqliteBlobStore {
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_blob(&mut self, key: &str, bytes: &[u8]) -> RepoResult<()> {
        let changed = self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, bytes],
        )?;
        if changed != 1 {
            warn!(
                "event=blob_write module=repo status=warn key={} changed_rows={}",
                key, changed
            );
        }
        Ok(())
    }
}
