use crate::backup::{BackupError, BackupStore};
use crate::presets;
use crate::statics;
use crate::store::{ConfigStore, StoreError};
use crate::value::{self, CfgValue, ParseError};

/// Where a session currently stands. Mostly useful for logging and tests;
/// the GUI reacts to operation results directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loaded,
    PresetApplied,
    Reformatted,
    Restored,
    Saved,
    Rejected,
    Cancelled,
}

/// Result of a save attempt that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Rejected { reason: String },
}

/// An in-progress edit of one store entry.
///
/// The session owns a text buffer the user edits freely; it only has to be
/// valid JSON at the points that need structure (formatting, preset, save).
/// Opening a session snapshots the entry's current value into the backup
/// store, so the pre-edit state stays recoverable forever.
pub struct EditSession {
    key: String,
    buffer: String,
    pretty: bool,
    state: SessionState,
}

impl EditSession {
    /// Start editing `key`. The buffer holds the stored value verbatim and
    /// the format mode starts compact. A failed backup snapshot is logged
    /// but does not block editing.
    pub fn open(store: &ConfigStore, backups: &BackupStore, key: &str) -> EditSession {
        let current = store.get(key);
        match backups.snapshot_if_absent(key, &current) {
            Ok(true) => tracing::debug!(key, "snapshotted original value"),
            Ok(false) => {}
            Err(e) => tracing::warn!(key, error = %e, "backup snapshot failed"),
        }
        EditSession {
            key: key.to_owned(),
            buffer: current,
            pretty: false,
            state: SessionState::Loaded,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Inject the handwriting note-config fragment for this key.
    ///
    /// A blank buffer counts as an empty object, so the preset also works on
    /// never-configured entries. `globalActivityConfig` is created on demand
    /// (replacing a non-object value), its other fields are left alone, and
    /// only `noteConfig` is overwritten. The buffer is re-rendered in the
    /// current format mode. An unparseable buffer is left untouched.
    pub fn apply_preset(&mut self) -> Result<(), ParseError> {
        let source = if self.buffer.trim().is_empty() {
            "{}"
        } else {
            self.buffer.as_str()
        };
        let mut obj = value::parse_object(source)?;

        let global = obj
            .entry(statics::EAC_FIELD_GLOBAL_ACTIVITY_CONFIG.to_owned())
            .or_insert_with(CfgValue::empty_object);
        if global.as_object().is_none() {
            *global = CfgValue::empty_object();
        }
        if let Some(map) = global.as_object_mut() {
            map.insert(
                statics::EAC_FIELD_NOTE_CONFIG.to_owned(),
                presets::build_preset(&self.key),
            );
        }

        self.buffer = if self.pretty {
            value::to_pretty(&obj)
        } else {
            value::to_compact(&obj)
        };
        self.state = SessionState::PresetApplied;
        Ok(())
    }

    /// Re-render the buffer pretty or compact. On a parse failure neither
    /// the buffer nor the mode changes, so the caller can revert its toggle.
    pub fn toggle_format(&mut self, pretty: bool) -> Result<(), ParseError> {
        let obj = value::parse_object(self.buffer.trim())?;
        self.buffer = if pretty {
            value::to_pretty(&obj)
        } else {
            value::to_compact(&obj)
        };
        self.pretty = pretty;
        self.state = SessionState::Reformatted;
        Ok(())
    }

    /// Replace the buffer with the pre-edit snapshot.
    ///
    /// In pretty mode the snapshot is re-rendered when it parses; a snapshot
    /// that is not valid JSON goes in verbatim and drops the session back to
    /// compact mode.
    pub fn restore_backup(&mut self, backups: &BackupStore) -> Result<(), BackupError> {
        let original = backups.read_backup(&self.key)?;
        if self.pretty {
            match value::parse_object(&original) {
                Ok(obj) => self.buffer = value::to_pretty(&obj),
                Err(_) => {
                    self.buffer = original;
                    self.pretty = false;
                }
            }
        } else {
            self.buffer = original;
        }
        self.state = SessionState::Restored;
        Ok(())
    }

    /// Text for the clipboard, rendered in the session's format mode when
    /// the buffer parses. An unparseable buffer is copied trimmed as-is.
    pub fn copy_text(&self) -> String {
        let trimmed = self.buffer.trim();
        match value::parse_object(trimmed) {
            Ok(obj) if self.pretty => value::to_pretty(&obj),
            Ok(obj) => value::to_compact(&obj),
            Err(_) => trimmed.to_owned(),
        }
    }

    /// Validate the buffer and write it through to the store.
    ///
    /// Accepted entries must be trimmed text starting with `{` that parses
    /// as a JSON object; what is stored is the canonical compact rendering,
    /// not the user's formatting. A rejection leaves the store, the buffer,
    /// and any backups untouched. A store write failure comes back as
    /// `Err`, distinct from validation.
    pub fn save(&mut self, store: &mut ConfigStore) -> Result<SaveOutcome, StoreError> {
        let input = self.buffer.trim();
        if !input.starts_with('{') {
            self.state = SessionState::Rejected;
            return Ok(SaveOutcome::Rejected {
                reason: statics::EN_ERR_SAVE_REJECTED.to_owned(),
            });
        }
        let obj = match value::parse_object(input) {
            Ok(obj) => obj,
            Err(e) => {
                self.state = SessionState::Rejected;
                return Ok(SaveOutcome::Rejected {
                    reason: e.to_string(),
                });
            }
        };

        store.put(&self.key, &value::to_compact(&obj));
        store.sync()?;
        self.state = SessionState::Saved;
        tracing::info!(key = %self.key, "entry saved");
        Ok(SaveOutcome::Saved)
    }

    /// Abandon the edit. The store was never touched by buffer changes.
    pub fn cancel(&mut self) {
        self.state = SessionState::Cancelled;
    }
}
