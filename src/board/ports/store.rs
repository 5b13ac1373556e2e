//! Record store port: a key-value store of JSON record sequences.
//!
//! Each [`Collection`] maps to one key whose value is the full ordered list
//! of plain JSON records. The board loads every collection at startup and
//! writes back a whole collection after each mutation.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Named collections persisted by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Task records.
    Tasks,
    /// User records.
    Users,
    /// Category records.
    Categories,
    /// Activity log records.
    Activities,
    /// Subtask records.
    Subtasks,
    /// The signed-in user, stored as a single-element sequence.
    Session,
}

impl Collection {
    /// Every collection, in load order.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Categories,
        Self::Tasks,
        Self::Subtasks,
        Self::Activities,
        Self::Session,
    ];

    /// Returns the storage key for this collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Activities => "activities",
            Self::Subtasks => "subtasks",
            Self::Session => "currentUser",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Durable key-value storage for record collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads every record stored under `collection`.
    ///
    /// A collection that has never been written loads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the stored value cannot be read or is not
    /// a JSON array.
    async fn load(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    /// Replaces the records stored under `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write does not complete.
    async fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()>;
}

/// Errors returned by record store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Reading or writing the underlying medium failed.
    #[error("storage i/o error on {collection}: {source}")]
    Io {
        /// Collection being accessed.
        collection: Collection,
        /// Underlying failure.
        source: Arc<std::io::Error>,
    },

    /// Stored bytes are not a JSON array of records.
    #[error("malformed stored value for {collection}: {source}")]
    Malformed {
        /// Collection being decoded.
        collection: Collection,
        /// Underlying failure.
        source: Arc<serde_json::Error>,
    },

    /// The backing location could not be opened.
    #[error("cannot open record store at {root}: {source}")]
    Open {
        /// Location that failed to open.
        root: String,
        /// Underlying failure.
        source: Arc<std::io::Error>,
    },

    /// The store is unavailable (for example, a poisoned lock).
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wraps an I/O failure for `collection`.
    #[must_use]
    pub fn io(collection: Collection, err: std::io::Error) -> Self {
        Self::Io {
            collection,
            source: Arc::new(err),
        }
    }

    /// Wraps a JSON decoding failure for `collection`.
    #[must_use]
    pub fn malformed(collection: Collection, err: serde_json::Error) -> Self {
        Self::Malformed {
            collection,
            source: Arc::new(err),
        }
    }
}
