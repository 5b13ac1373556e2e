//! Directory-backed record store.
//!
//! Each collection lives in `<key>.json` inside a capability-scoped
//! directory as a pretty-printed JSON array. Writes go to a sibling temp
//! file which is then renamed over the target, so a reader never observes a
//! half-written collection. File access runs on Tokio's blocking pool so
//! the executor threads stay free.

use crate::board::ports::{Collection, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::Value;
use std::io::ErrorKind;
use std::sync::Arc;

/// Record store persisting collections as JSON files in one directory.
#[derive(Debug)]
pub struct DirectoryRecordStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl DirectoryRecordStore {
    /// Opens (creating if needed) the store directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> StoreResult<Self> {
        let root_path = root.as_ref();
        let open_error = |err: std::io::Error| StoreError::Open {
            root: root_path.to_string(),
            source: Arc::new(err),
        };
        Dir::create_ambient_dir_all(root_path, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root_path, ambient_authority()).map_err(open_error)?;
        tracing::debug!(root = %root_path, "opened directory record store");
        Ok(Self {
            root: root_path.to_owned(),
            dir: Arc::new(dir),
        })
    }

    /// Returns the directory backing this store.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(collection: Collection) -> String {
        format!("{}.json", collection.key())
    }

    /// Runs synchronous directory work for `collection` on the blocking pool.
    async fn run_blocking<F, T>(&self, collection: Collection, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Dir) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(|err| {
                StoreError::Unavailable(format!("{collection} file task failed: {err}"))
            })?
    }
}

#[async_trait]
impl RecordStore for DirectoryRecordStore {
    async fn load(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let file = Self::file_name(collection);
        let read = self
            .run_blocking(collection, move |dir| match dir.read_to_string(&file) {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StoreError::io(collection, err)),
            })
            .await?;
        let Some(contents) = read.filter(|contents| !contents.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents).map_err(|err| StoreError::malformed(collection, err))
    }

    async fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()> {
        let target = Self::file_name(collection);
        let temp = format!("{target}.tmp");
        let data = serde_json::to_string_pretty(records)
            .map_err(|err| StoreError::malformed(collection, err))?;
        self.run_blocking(collection, move |dir| {
            dir.write(&temp, data.as_bytes())
                .map_err(|err| StoreError::io(collection, err))?;
            dir.rename(&temp, dir, &target)
                .map_err(|err| StoreError::io(collection, err))
        })
        .await
    }
}
