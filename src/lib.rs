//! Core library for the Onyx Config Store Editor (OCSE).
//! Provides a strict JSON codec for config entry values, one-time pre-edit
//! backups, and a validated edit workflow over the device's onyx_config
//! key-value store.

mod backup;
mod gui;
mod listing;
pub mod presets;
mod session;
pub mod statics;
mod store;
pub mod value;

pub use backup::{BackupError, BackupStore};
pub use gui::run_gui;
pub use listing::{Entry, Listing, ListingState};
pub use session::{EditSession, SaveOutcome, SessionState};
pub use store::{ConfigStore, StoreError};
pub use value::{CfgNumber, CfgObject, CfgValue, ParseError};
