//! Integration tests for file-backed persistence
//!
//! Exercises the full path from a filled container through `TextFileIO`
//! and back: JSON round-trips for mapping containers, cache behavior,
//! processor hooks, and configuration-driven cache setup.

use std::fs;

use assert_matches::assert_matches;
use datakit_shared::{
    CacheSettings, DataKind, FileExistsProcessor, GenericDataContainer, ReadOptions, SharedConfig,
    SharedError, TextFileIO, Value,
};

#[test]
fn mapping_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut io = TextFileIO::new(dir.path(), "settings.json");

    let mut container = GenericDataContainer::new("settings", DataKind::Mapping);
    container.store(Value::from("alpha"), Some("name")).unwrap();
    container.store(Value::from(3i64), Some("retries")).unwrap();
    container.store(Value::from(1.5f64), Some("ratio")).unwrap();
    io.write(&container, None).unwrap();

    let back = io.read(None, &ReadOptions::default()).unwrap();
    assert_eq!(back.data_type(), DataKind::String);

    let parsed: serde_json::Value = serde_json::from_str(back.data().as_text().unwrap()).unwrap();
    let entries = parsed.as_object().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries["name"], "alpha");
    assert_eq!(entries["retries"], 3);
    assert_eq!(entries["ratio"], 1.5);
}

#[test]
fn mapping_overwrite_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut io = TextFileIO::new(dir.path(), "overwrite.json");

    let mut container = GenericDataContainer::new("overwrite", DataKind::Mapping);
    container.store(Value::from("first"), Some("k1")).unwrap();
    container.store(Value::from("second"), Some("k1")).unwrap();
    io.write(&container, None).unwrap();

    let back = io.read(None, &ReadOptions::default()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(back.data().as_text().unwrap()).unwrap();
    assert_eq!(parsed.as_object().unwrap().len(), 1);
    assert_eq!(parsed["k1"], "second");
}

#[test]
fn tuple_writes_as_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let mut io = TextFileIO::new(dir.path(), "tuple.json");

    let mut container = GenericDataContainer::new("pair", DataKind::Tuple);
    container
        .store(Value::from(vec![Value::from("a"), Value::from("b")]), None)
        .unwrap();
    io.write(&container, None).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(io.uri()).unwrap()).unwrap();
    assert_eq!(parsed, serde_json::json!(["a", "b"]));
}

#[test]
fn cache_from_config_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cached.txt");
    fs::write(&path, "v1").unwrap();

    let mut config = SharedConfig::default();
    config.cache.enabled = true;
    config.cache.max_age_secs = 900;

    let mut io = TextFileIO::new(dir.path(), "cached.txt").with_cache_settings(&config.cache);
    assert_eq!(
        io.read(None, &ReadOptions::default())
            .unwrap()
            .data()
            .as_text(),
        Some("v1")
    );

    fs::write(&path, "v2").unwrap();
    // warm cache answers until forced
    assert_eq!(
        io.read(None, &ReadOptions::default())
            .unwrap()
            .data()
            .as_text(),
        Some("v1")
    );
    assert_eq!(
        io.read(None, &ReadOptions { force: true })
            .unwrap()
            .data()
            .as_text(),
        Some("v2")
    );
}

#[test]
fn disabled_cache_always_reads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, "v1").unwrap();

    let settings = CacheSettings::default();
    assert!(!settings.enabled);

    let mut io = TextFileIO::new(dir.path(), "plain.txt").with_cache_settings(&settings);
    io.read(None, &ReadOptions::default()).unwrap();

    fs::write(&path, "v2").unwrap();
    assert_eq!(
        io.read(None, &ReadOptions::default())
            .unwrap()
            .data()
            .as_text(),
        Some("v2")
    );
}

#[test]
fn read_processor_runs_and_propagates_failure() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target.txt");
    fs::write(&target, "payload").unwrap();

    // pointer file whose content names an existing file
    fs::write(
        dir.path().join("pointer.txt"),
        target.to_string_lossy().as_ref(),
    )
    .unwrap();

    let mut io = TextFileIO::new(dir.path(), "pointer.txt");
    let processor = FileExistsProcessor::new();
    assert!(io.read(Some(&processor), &ReadOptions::default()).is_ok());

    // pointer to a missing file fails the read through the hook
    fs::write(dir.path().join("pointer.txt"), "/no/such/target").unwrap();
    assert_matches!(
        io.read(Some(&processor), &ReadOptions::default()),
        Err(SharedError::Validation { .. })
    );
}

#[test]
fn write_processor_receives_the_written_container() {
    let dir = tempfile::tempdir().unwrap();
    let mut io = TextFileIO::new(dir.path(), "out.txt");

    // the container's own text names a file that exists only after write
    let mut container = GenericDataContainer::new("out", DataKind::String);
    container
        .store(
            Value::from(io.uri().to_string_lossy().as_ref()),
            None,
        )
        .unwrap();

    let processor = FileExistsProcessor::new();
    io.write(&container, Some(&processor)).unwrap();
    assert!(io.uri().is_file());
}

#[test]
fn config_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datakit").join("config.toml");

    let mut config = SharedConfig::default();
    config.logging.debug = true;
    config.cache.enabled = true;
    config.save_to(&path).unwrap();

    let reloaded = SharedConfig::load_from(&path).unwrap();
    assert_eq!(reloaded, config);
}
