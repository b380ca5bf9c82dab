use pretty_assertions::assert_eq;

use ocse::{
    BackupStore, ConfigStore, EditSession, SaveOutcome, SessionState, presets, statics, value,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn editor_fixture(seed: &[(&str, &str)]) -> Result<(tempfile::TempDir, ConfigStore, BackupStore)> {
    let tmp = tempfile::tempdir()?;
    let store_dir = tmp.path().join("mmkv");
    std::fs::create_dir(&store_dir)?;

    let mut store = ConfigStore::open(&store_dir)?;
    for (k, v) in seed {
        store.put(k, v);
    }
    store.sync()?;

    let backups = BackupStore::new(tmp.path().join("backups"));
    Ok((tmp, store, backups))
}

#[test]
fn optimize_then_save_is_durable_and_canonical() -> Result<()> {
    let key = "eac_app_md.obsidian";
    let original = r#"{"appScale":2}"#;
    let (_tmp, mut store, backups) = editor_fixture(&[(key, original)])?;

    let mut session = EditSession::open(&store, &backups, key);
    session.apply_preset()?;

    // Formatting for review, then saving: the store still receives the
    // canonical compact form, not the pretty buffer.
    session.toggle_format(true)?;
    assert!(session.buffer().contains("\n    "));
    assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);

    let reopened = ConfigStore::open(store.dir())?;
    let stored = reopened.get(key);
    assert!(!stored.contains('\n'));

    let obj = value::parse_object(&stored)?;
    assert_eq!(
        obj.get("appScale"),
        value::parse_object(original)?.get("appScale")
    );
    let note = obj[statics::EAC_FIELD_GLOBAL_ACTIVITY_CONFIG]
        .get(statics::EAC_FIELD_NOTE_CONFIG)
        .cloned();
    assert_eq!(note, Some(presets::build_preset(key)));

    // The pre-edit snapshot still holds the very first value.
    assert_eq!(backups.read_backup(key)?, original);
    Ok(())
}

#[test]
fn rejected_saves_leave_the_store_file_untouched() -> Result<()> {
    let key = "eac_app_net.cozic.joplin";
    let (_tmp, mut store, backups) = editor_fixture(&[(key, r#"{"v":1}"#)])?;
    let file = store.dir().join(statics::STORE_FILE_NAME);
    let before = std::fs::read_to_string(&file)?;

    let mut session = EditSession::open(&store, &backups, key);

    *session.buffer_mut() = "\"just a string\"".to_owned();
    let outcome = session.save(&mut store)?;
    assert_eq!(
        outcome,
        SaveOutcome::Rejected {
            reason: statics::EN_ERR_SAVE_REJECTED.to_owned()
        }
    );

    *session.buffer_mut() = "{\"v\": }".to_owned();
    assert!(matches!(
        session.save(&mut store)?,
        SaveOutcome::Rejected { .. }
    ));
    assert_eq!(session.state(), SessionState::Rejected);

    assert_eq!(std::fs::read_to_string(&file)?, before);
    Ok(())
}

#[test]
fn a_bad_edit_can_be_rolled_back_from_the_backup() -> Result<()> {
    let key = "eac_app_com.xodo.pdf.reader";
    let original = r#"{"mode":"pen","width":2}"#;
    let (_tmp, mut store, backups) = editor_fixture(&[(key, original)])?;

    // First session ruins the entry (but validly, so save accepts it).
    let mut session = EditSession::open(&store, &backups, key);
    *session.buffer_mut() = r#"{"mode":"broken"}"#.to_owned();
    assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);
    assert_eq!(store.get(key), r#"{"mode":"broken"}"#);

    // Second session restores the snapshot and saves it back.
    let mut session = EditSession::open(&store, &backups, key);
    session.restore_backup(&backups)?;
    assert_eq!(session.buffer(), original);
    assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);

    let reopened = ConfigStore::open(store.dir())?;
    assert_eq!(reopened.get(key), original);
    Ok(())
}

#[test]
fn editing_a_brand_new_key_starts_from_an_empty_buffer() -> Result<()> {
    let (_tmp, mut store, backups) = editor_fixture(&[])?;

    let mut session = EditSession::open(&store, &backups, "eac_app_md.obsidian");
    assert_eq!(session.buffer(), "");

    // The snapshot records the pre-edit emptiness.
    assert_eq!(backups.read_backup("eac_app_md.obsidian")?, "");

    session.apply_preset()?;
    assert_eq!(session.save(&mut store)?, SaveOutcome::Saved);

    let stored = store.get("eac_app_md.obsidian");
    let obj = value::parse_object(&stored)?;
    let view = obj[statics::EAC_FIELD_GLOBAL_ACTIVITY_CONFIG]
        .get(statics::EAC_FIELD_NOTE_CONFIG)
        .and_then(|n| n.get(statics::PRESET_FIELD_DRAW_VIEW_KEY))
        .and_then(ocse::CfgValue::as_str);
    assert_eq!(view, Some("com.getcapacitor.CapacitorWebView"));
    Ok(())
}
