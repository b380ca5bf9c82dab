use pretty_assertions::assert_eq;
use std::path::Path;

use ocse::{CfgValue, ConfigStore, Listing, ListingState, StoreError, statics, value};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn opening_a_missing_store_directory_fails_without_creating_it() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store_dir = dir.path().join("onyxconfig").join("mmkv");

    match ConfigStore::open(&store_dir) {
        Err(StoreError::Unavailable(path)) => assert_eq!(path, store_dir),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert!(!store_dir.exists());
    Ok(())
}

#[test]
fn store_lifecycle_reads_back_what_was_synced() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store_dir = dir.path().join("mmkv");
    std::fs::create_dir(&store_dir)?;

    let mut store = ConfigStore::open(&store_dir)?;
    assert!(store.is_empty());

    store.put("eac_app_md.obsidian", r#"{"enable":true}"#);
    store.put("dropdown_menu", "legacy");
    store.put("eac_device_fling", r#"{"threshold":3}"#);
    store.sync()?;

    // The store file itself is a strict JSON object of strings.
    let raw = std::fs::read_to_string(store_dir.join(statics::STORE_FILE_NAME))?;
    let parsed = value::parse_object(&raw)?;
    assert_eq!(parsed.len(), 3);
    assert_eq!(
        parsed.get("dropdown_menu").and_then(CfgValue::as_str),
        Some("legacy")
    );

    let reopened = ConfigStore::open(&store_dir)?;
    let keys: Vec<&str> = reopened.keys().collect();
    assert_eq!(
        keys,
        ["eac_app_md.obsidian", "dropdown_menu", "eac_device_fling"]
    );
    assert_eq!(reopened.get("eac_device_fling"), r#"{"threshold":3}"#);
    assert_eq!(reopened.get("never_written"), "");
    Ok(())
}

#[test]
fn listing_reflects_the_store_and_its_filters() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store_dir = dir.path().join("mmkv");
    std::fs::create_dir(&store_dir)?;

    let mut store = ConfigStore::open(&store_dir)?;
    store.put("eac_app_md.obsidian", "{}");
    store.put("eac_app_net.cozic.joplin", "{}");
    store.put("reader_settings", "{}");

    let mut listing = Listing::empty();
    listing.refresh(&store);

    assert_eq!(listing.filter("", false).len(), 2);
    assert_eq!(listing.filter("", true).len(), 3);

    let hits = listing.filter("joplin", false);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "eac_app_net.cozic.joplin");
    assert_eq!(hits[0].value, "{}");

    listing.fail("device store unplugged");
    assert!(matches!(listing.state(), ListingState::Error(_)));
    assert!(listing.filter("", true).is_empty());
    Ok(())
}
