use pretty_assertions::assert_eq;
use std::path::Path;

use ocse::{BackupStore, ConfigStore, EditSession, SaveOutcome};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn the_first_session_wins_the_snapshot_forever() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let store_dir = tmp.path().join("mmkv");
    std::fs::create_dir(&store_dir)?;

    let mut store = ConfigStore::open(&store_dir)?;
    store.put("eac_x", "first");
    store.sync()?;

    let backups = BackupStore::new(tmp.path().join("backups"));

    let mut session = EditSession::open(&store, &backups, "eac_x");
    *session.buffer_mut() = r#"{"v":2}"#.to_owned();
    assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);

    // Edit the same key again, several times, even from a fresh store.
    let mut store = ConfigStore::open(&store_dir)?;
    for round in 3..6 {
        let mut session = EditSession::open(&store, &backups, "eac_x");
        *session.buffer_mut() = format!(r#"{{"v":{round}}}"#);
        assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);
    }

    assert_eq!(backups.count(), 1);
    assert_eq!(backups.read_backup("eac_x")?, "first");
    Ok(())
}

#[test]
fn snapshots_of_distinct_keys_live_side_by_side() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let store_dir = tmp.path().join("mmkv");
    std::fs::create_dir(&store_dir)?;

    let mut store = ConfigStore::open(&store_dir)?;
    store.put("eac_app_md.obsidian", "obsidian-original");
    store.put("eac_app:com.penly.penly", "penly-original");
    store.sync()?;

    let backups = BackupStore::new(tmp.path().join("backups"));
    let _ = EditSession::open(&store, &backups, "eac_app_md.obsidian");
    let _ = EditSession::open(&store, &backups, "eac_app:com.penly.penly");

    assert_eq!(backups.count(), 2);
    assert_eq!(
        backups.read_backup("eac_app_md.obsidian")?,
        "obsidian-original"
    );
    assert_eq!(
        backups.read_backup("eac_app:com.penly.penly")?,
        "penly-original"
    );
    Ok(())
}

#[test]
fn default_backup_dir_is_namespaced_under_the_app() {
    let dir = BackupStore::default_dir();
    assert!(dir.ends_with(Path::new("ocse").join("backups")), "{dir:?}");
}
