use crate::statics;
use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure modes of opening and syncing the config store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("config store directory {} does not exist", .0.display())]
    Unavailable(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The device's string-to-string config store, loaded fully into memory.
///
/// The store directory is owned by the firmware: it must already exist when
/// opening and is never created here. A missing store *file* inside it is
/// fine and reads as an empty store. Mutations stay in memory until [`sync`]
/// writes them out; dropping the store discards pending writes.
///
/// [`sync`]: ConfigStore::sync
#[derive(Debug)]
pub struct ConfigStore {
    dir: PathBuf,
    file: PathBuf,
    entries: IndexMap<String, String>,
    pending: bool,
}

impl ConfigStore {
    pub fn open(dir: &Path) -> Result<ConfigStore, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::Unavailable(dir.to_owned()));
        }

        let file = dir.join(statics::STORE_FILE_NAME);
        let entries = if file.exists() {
            let text = fs::read_to_string(&file).map_err(|source| StoreError::Read {
                path: file.clone(),
                source,
            })?;
            serde_json::from_str::<IndexMap<String, String>>(&text).map_err(|source| {
                StoreError::Corrupt {
                    path: file.clone(),
                    source,
                }
            })?
        } else {
            IndexMap::new()
        };

        tracing::debug!(
            path = %file.display(),
            entries = entries.len(),
            "opened config store"
        );
        Ok(ConfigStore {
            dir: dir.to_owned(),
            file,
            entries,
            pending: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Value for `key`, or the empty string when the key is absent. The
    /// device treats unset keys as empty, so callers never see an Option.
    pub fn get(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Stage a new value for `key`. Not durable until [`sync`] is called.
    ///
    /// [`sync`]: ConfigStore::sync
    pub fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.pending = true;
    }

    /// Write all entries back to the store file.
    pub fn sync(&mut self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.entries).map_err(|e| StoreError::Write {
            path: self.file.clone(),
            source: io::Error::other(e),
        })?;
        fs::write(&self.file, text).map_err(|source| StoreError::Write {
            path: self.file.clone(),
            source,
        })?;
        self.pending = false;
        tracing::debug!(entries = self.entries.len(), "synced config store");
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
