use crate::statics;
use base64::{Engine as _, engine::general_purpose};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure modes of backup reads/writes.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("no backup recorded for key {key:?}")]
    NotFound { key: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One-time snapshots of entry values, one file per key.
///
/// A snapshot is taken before the first edit of a key and never overwritten,
/// so the file always holds the value as it was before this tool touched it.
/// Filenames are the URL-safe base64 of the key, which keeps arbitrary key
/// characters (dots, colons) out of the filesystem while staying reversible.
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> BackupStore {
        BackupStore { dir: dir.into() }
    }

    /// Per-user data directory, e.g. `~/.local/share/ocse/backups` on Linux.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(statics::APP_DIR_NAME)
            .join(statics::BACKUP_DIR_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> PathBuf {
        let stem = general_purpose::URL_SAFE.encode(key.as_bytes());
        self.dir
            .join(format!("{stem}.{}", statics::BACKUP_FILE_EXT))
    }

    pub fn has_backup(&self, key: &str) -> bool {
        self.file_for(key).exists()
    }

    /// Record `value` as the pristine state of `key` unless a snapshot
    /// already exists. Returns whether a new snapshot was written. The
    /// backup directory is created on first use.
    pub fn snapshot_if_absent(&self, key: &str, value: &str) -> Result<bool, BackupError> {
        let path = self.file_for(key);
        if path.exists() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        Ok(true)
    }

    pub fn read_backup(&self, key: &str) -> Result<String, BackupError> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BackupError::NotFound {
                key: key.to_owned(),
            }),
            Err(e) => Err(BackupError::Io(e)),
        }
    }

    /// Number of snapshot files currently on disk. A missing directory
    /// counts as zero.
    pub fn count(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return 0;
        };
        entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .is_some_and(|ext| ext == statics::BACKUP_FILE_EXT)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{BackupError, BackupStore};
    use base64::{Engine as _, engine::general_purpose};
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_is_taken_once_and_never_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path().join("backups"));

        assert!(!store.has_backup("eac_app_md.obsidian"));
        assert_eq!(store.count(), 0);

        let wrote = store
            .snapshot_if_absent("eac_app_md.obsidian", r#"{"v":1}"#)
            .unwrap();
        assert!(wrote);
        assert!(store.has_backup("eac_app_md.obsidian"));

        let wrote_again = store
            .snapshot_if_absent("eac_app_md.obsidian", r#"{"v":2}"#)
            .unwrap();
        assert!(!wrote_again);

        let text = store.read_backup("eac_app_md.obsidian").unwrap();
        assert_eq!(text, r#"{"v":1}"#);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn missing_backups_are_reported_with_the_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path().join("backups"));

        match store.read_backup("eac_never_edited") {
            Err(BackupError::NotFound { key }) => assert_eq!(key, "eac_never_edited"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn filenames_stay_distinct_and_reversible_for_awkward_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path());

        // The ':' and '_' spellings are different keys and must not collide.
        store
            .snapshot_if_absent("eac_app:com.penly.penly", "colon")
            .unwrap();
        store
            .snapshot_if_absent("eac_app_com.penly.penly", "underscore")
            .unwrap();

        assert_eq!(store.read_backup("eac_app:com.penly.penly").unwrap(), "colon");
        assert_eq!(
            store.read_backup("eac_app_com.penly.penly").unwrap(),
            "underscore"
        );

        // Every snapshot filename decodes back to its original key.
        let mut decoded: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .map(|p| {
                let stem = p.file_stem().unwrap().to_str().unwrap().to_owned();
                let bytes = general_purpose::URL_SAFE.decode(stem).unwrap();
                String::from_utf8(bytes).unwrap()
            })
            .collect();
        decoded.sort();
        assert_eq!(
            decoded,
            ["eac_app:com.penly.penly", "eac_app_com.penly.penly"]
        );
    }

    #[test]
    fn count_ignores_foreign_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path());

        std::fs::write(tmp.path().join("notes.md"), "not a backup").unwrap();
        store.snapshot_if_absent("eac_a", "1").unwrap();
        store.snapshot_if_absent("eac_b", "2").unwrap();

        assert_eq!(store.count(), 2);
    }
}
