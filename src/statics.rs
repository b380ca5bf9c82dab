// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// External links
pub const GITHUB_URL: &str = "https://github.com/ocse-tools/ocse";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "OCSE: Onyx Config Store Editor";

pub const EN_BTN_OPEN_STORE: &str = "Open Store...";
pub const EN_BTN_RELOAD: &str = "Reload";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_ABOUT_HEADING: &str = "OCSE: Onyx Config Store Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_BLURB: &str =
    "Inspect and edit entries of the onyx_config key-value store. A one-time \
     backup of every entry is taken before its first edit.";
pub const EN_PROJECT_REPO: &str = "GitHub Repo";

pub const EN_LABEL_FILTER: &str = "Filter:";
pub const EN_HINT_FILTER: &str = "key substring";
pub const EN_TOGGLE_SHOW_ALL: &str = "Show all keys";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_COL_KEY: &str = "Key";
pub const EN_COL_VALUE: &str = "Value";
pub const EN_BTN_EDIT: &str = "Edit";

pub const EN_LIST_EMPTY: &str = "No entries match the current filter.";
pub const EN_STORE_HINT: &str =
    "Open the device config directory (e.g. /onyxconfig/mmkv) to begin.";

// Edit dialog
pub const EN_SWITCH_FORMAT: &str = "Format JSON";
pub const EN_BTN_PRESET: &str = "Optimize Handwriting";
pub const EN_BTN_RESTORE: &str = "Restore Backup";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_COPY: &str = "Copy";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_OK: &str = "OK";

pub const EN_MSG_PRESET_APPLIED: &str = "Handwriting optimization settings added";
pub const EN_MSG_RESTORED: &str = "Backup restored to editor";
pub const EN_MSG_COPIED_PRETTY: &str = "Copied to clipboard (formatted)";
pub const EN_MSG_COPIED_COMPACT: &str = "Copied to clipboard (minimized)";

pub const EN_ERR_INVALID_OBJECT: &str = "Invalid JSON object structure";
pub const EN_ERR_SAVE_REJECTED: &str =
    "The entry must be a valid JSON object starting with '{'.";

pub const EN_WINDOW_SAVED: &str = "Saved";
pub const EN_MSG_SAVED_RESTART: &str =
    "Your changes have been written to the config store.\n\nIMPORTANT: restart \
     the device for them to take effect.";

// Status bar
pub const EN_LABEL_ENTRIES: &str = "entries:";
pub const EN_LABEL_BACKUPS: &str = "backups:";
pub const EN_BADGE_PENDING: &str = "pending writes";
pub const EN_PLACEHOLDER_NO_STORE: &str = "<no store>";

pub const EN_EMPTY: &str = "";

// Store layout. Onyx devices expose the system config store under a fixed
// directory; it must already exist, the editor never creates it.
pub const STORE_DIR_DEVICE: &str = "/onyxconfig/mmkv";
pub const STORE_FILE_NAME: &str = "onyx_config.json";

// Keys of the e-ink app-compatibility subsystem all share this prefix.
pub const EAC_KEY_PREFIX: &str = "eac_";

// Backup layout: one file per key under the local app data directory.
pub const APP_DIR_NAME: &str = "ocse";
pub const BACKUP_DIR_NAME: &str = "backups";
pub const BACKUP_FILE_EXT: &str = "txt";

// Structure keys inside eac_app* entry values (EAC_ prefix).
pub const EAC_FIELD_GLOBAL_ACTIVITY_CONFIG: &str = "globalActivityConfig";
pub const EAC_FIELD_NOTE_CONFIG: &str = "noteConfig";

// Fields of the handwriting note-config fragment (PRESET_ prefix).
pub const PRESET_FIELD_COMPATIBLE_VERSION_CODE: &str = "compatibleVersionCode";
pub const PRESET_FIELD_DRAW_VIEW_KEY: &str = "drawViewKey";
pub const PRESET_FIELD_ENABLE: &str = "enable";
pub const PRESET_FIELD_GLOBAL_STROKE_STYLE: &str = "globalStrokeStyle";
pub const PRESET_FIELD_STROKE_COLOR: &str = "strokeColor";
pub const PRESET_FIELD_STROKE_EXTRA_ARGS: &str = "strokeExtraArgs";
pub const PRESET_FIELD_STROKE_PARAMS: &str = "strokeParams";
pub const PRESET_FIELD_STROKE_STYLE: &str = "strokeStyle";
pub const PRESET_FIELD_STROKE_WIDTH: &str = "strokeWidth";
pub const PRESET_FIELD_REPAINT_LATENCY: &str = "repaintLatency";
pub const PRESET_FIELD_STYLE_MAP: &str = "styleMap";
pub const PRESET_FIELD_SUPPORT_NOTE_CONFIG: &str = "supportNoteConfig";

// Draw-view key used when an app has no specific mapping in the catalog.
pub const PRESET_DEFAULT_DRAW_VIEW_KEY: &str = "drawViewKeyValue";
