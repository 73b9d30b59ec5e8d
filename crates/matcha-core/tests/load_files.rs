use matcha_core::loader::load_entries;
use matcha_core::prelude::*;
use std::io::Write;
use tempfile::tempdir;

const DATA: &str = r#"[
    {"name": "Aoi", "address": "4 Rue Sainte-Anne, 75001 Paris", "latitude": 48.866, "longitude": 2.336, "rating": 4.7, "tags": "ceremonial"},
    {"name": "  ", "address": "Rue Oberkampf, 75011 Paris", "my_rating": "4.1", "price": "€€"},
    "stray string",
    {"name": "Kissa", "lat": 48.87, "notes": {"en": "Quiet", "fr": "Calme"}}
]"#;

fn write_file(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path
}

#[test]
fn plain_json_file_loads_tolerantly() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "data.json", DATA.as_bytes());

    let entries = load_entries(&path).unwrap();
    assert_eq!(entries.len(), 3);

    let aoi = &entries[0];
    assert_eq!(aoi.rating.value(), Some(4.7));
    assert!(aoi.coordinates.is_some());
    assert!(aoi.has_tag("ceremonial"));
    assert_eq!(aoi.zone(), Zone::new(1));

    // blank name gets the placeholder; a string rating is not a rating
    let blank = &entries[1];
    assert_eq!(blank.name, "(unnamed)");
    assert!(!blank.rating.is_rated());
    assert_eq!(blank.price.as_deref(), Some("€€"));

    // a lone latitude is not a position
    let kissa = &entries[2];
    assert!(kissa.coordinates.is_none());
    assert_eq!(kissa.notes.resolve(Language::Fr), Some("Calme"));
}

#[cfg(feature = "compact")]
#[test]
fn gzip_file_is_decompressed() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(DATA.as_bytes()).unwrap();
    let gz = enc.finish().unwrap();

    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "data.json.gz", &gz);

    let store = EntryStore::load_from_path(&path);
    assert!(store.is_ready());
    assert_eq!(store.len(), 3);
    assert_eq!(store.mapped_count(), 1);
    assert_eq!(store.rated_count(), 1);
}

#[test]
fn missing_file_gives_empty_failed_store() {
    let dir = tempdir().unwrap();
    let store = EntryStore::load_from_path(dir.path().join("nope.json"));
    assert!(matches!(store.status(), LoadStatus::Failed(msg) if msg.contains("nope.json")));
    assert!(store.is_empty());

    let mut d = Directory::new(store, EngineConfig::default());
    let p = d.dispatch(Action::SetQuery("aoi".into()));
    assert!(p.rows.is_empty());
    assert_eq!(p.empty_message.as_deref(), Some("No results."));
}

#[test]
fn config_file_round_trips_through_the_directory() {
    let dir = tempdir().unwrap();
    let cfg_path = write_file(
        dir.path(),
        "matcha.toml",
        b"top_picks_threshold = 4.0\ntag_mode = \"all-of\"\n",
    );
    let data_path = write_file(dir.path(), "data.json", DATA.as_bytes());

    let cfg = EngineConfig::load_from_path(&cfg_path).unwrap();
    let mut d = Directory::new(EntryStore::load_from_path(&data_path), cfg);
    let p = d.dispatch(Action::SetTopPicks(true));
    assert_eq!(p.visible_ids(), [EntryId(0)]);

    assert!(EngineConfig::load_from_path(dir.path().join("missing.toml")).is_err());
}
