//! Library-level tests: build, write, read back.

use std::fs;

use chrono::{TimeZone, Utc};
use serde_json::Value;
use tempfile::tempdir;

use synoptic_sidecar::clock::FixedClock;
use synoptic_sidecar::output::{self, WriteMode};
use synoptic_sidecar::sidecar::{SidecarDocument, SidecarInputs, build};

const KEYS: [&str; 7] = [
    "status",
    "product_time",
    "generated_utc",
    "commit",
    "png_url",
    "areas_url",
    "sf_url",
];

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
}

fn read_object(path: &std::path::Path) -> serde_json::Map<String, Value> {
    let text = fs::read_to_string(path).expect("sidecar should be readable");
    match serde_json::from_str::<Value>(&text).expect("sidecar should be JSON") {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// =============================================================================
// Round-trip through the filesystem
// =============================================================================

#[test]
fn test_written_file_has_all_keys_with_nulls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("atlantic_focus.png.json");

    let doc = build(&SidecarInputs::default(), &clock());
    output::write(&doc, &path, WriteMode::Overwrite).unwrap();

    let map = read_object(&path);
    assert_eq!(map.len(), KEYS.len());
    for key in KEYS {
        assert!(map.contains_key(key), "missing key {key}");
    }

    assert_eq!(map["status"], "ok");
    assert_eq!(map["generated_utc"], "2024-05-06T07:08:09Z");
    for key in ["product_time", "commit", "png_url", "areas_url", "sf_url"] {
        assert!(map[key].is_null(), "{key} should be null");
    }
}

#[test]
fn test_written_file_matches_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sidecar.json");

    let doc = build(
        &SidecarInputs {
            commit: Some("abc123".to_string()),
            product_time: Some("2024-05-06T00:00:00Z".to_string()),
            ..SidecarInputs::default()
        },
        &clock(),
    );
    output::write(&doc, &path, WriteMode::Overwrite).unwrap();

    let parsed: SidecarDocument =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_written_file_is_two_space_indented_in_field_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sidecar.json");

    let doc = build(
        &SidecarInputs {
            commit: Some("c0ffee".to_string()),
            product_time: Some("2024-01-01T00:00:00Z".to_string()),
            generated_utc: Some("2024-01-02T03:04:05Z".to_string()),
            owner: "Acme".to_string(),
            repo: "charts".to_string(),
        },
        &clock(),
    );
    output::write(&doc, &path, WriteMode::Overwrite).unwrap();

    let expected = r#"{
  "status": "ok",
  "product_time": "2024-01-01T00:00:00Z",
  "generated_utc": "2024-01-02T03:04:05Z",
  "commit": "c0ffee",
  "png_url": "https://raw.githubusercontent.com/Acme/charts/c0ffee/synoptic/atlantic_focus.png",
  "areas_url": "https://raw.githubusercontent.com/Acme/charts/c0ffee/synoptic/atlantic_focus_areas.json",
  "sf_url": "https://raw.githubusercontent.com/Acme/charts/c0ffee/synoptic/shipping_forecast_latest.json"
}"#;
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_non_ascii_written_as_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sidecar.json");

    let doc = build(
        &SidecarInputs {
            product_time: Some("2024-01-01T00:00:00Z · Météo".to_string()),
            ..SidecarInputs::default()
        },
        &clock(),
    );
    output::write(&doc, &path, WriteMode::Overwrite).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Météo"));
    assert!(!text.contains("\\u00e9"));

    // Escaped and raw forms parse to the same value.
    let escaped: Value = serde_json::from_str(r#""M\u00e9t\u00e9o""#).unwrap();
    assert_eq!(escaped, "Météo");
}

// =============================================================================
// Failure cases
// =============================================================================

#[test]
fn test_missing_parent_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("synoptic").join("atlantic_focus.png.json");

    let doc = build(&SidecarInputs::default(), &clock());
    let err = output::write(&doc, &path, WriteMode::Overwrite).unwrap_err();

    assert!(matches!(err, synoptic_sidecar::Error::Io { .. }));
    assert!(err.to_string().contains("atlantic_focus.png.json"));
    assert!(!dir.path().join("synoptic").exists());
}
