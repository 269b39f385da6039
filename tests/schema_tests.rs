//! Schema store caching and document validation tests

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vehicle_components::document::ComponentDocument;
use vehicle_components::schema::{SchemaStore, validate_components};
use vehicle_components::system::RealSystem;

fn bundled_schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("vehicle_components_schema.json")
}

fn document(value: serde_json::Value) -> ComponentDocument {
    serde_json::from_value(value).unwrap()
}

fn conforming_document() -> ComponentDocument {
    document(json!({
        "Format version": 1,
        "Components": {
            "Flight Controller": {
                "Firmware": {"Type": "ArduCopter", "Version": "4.5.7"},
                "Specifications": {"MCU Series": "STM32H7xx"}
            },
            "Battery": {
                "Specifications": {"Chemistry": "Lipo", "Capacity mAh": 1800}
            }
        }
    }))
}

#[test]
fn conforming_document_passes_validation() {
    let system = RealSystem::new();
    let mut store = SchemaStore::new(bundled_schema_path());

    let report = validate_components(&mut store, &system, &conforming_document());
    assert!(report.is_valid);
    assert!(report.message.is_empty());
}

#[test]
fn missing_required_field_fails_with_message() {
    let system = RealSystem::new();
    let mut store = SchemaStore::new(bundled_schema_path());

    let report = validate_components(&mut store, &system, &document(json!({"Components": {}})));
    assert!(!report.is_valid);
    assert!(report.message.starts_with("Validation error"));
}

#[test]
fn out_of_enumeration_value_fails() {
    let system = RealSystem::new();
    let mut store = SchemaStore::new(bundled_schema_path());
    let mut invalid = conforming_document();
    let value = invalid.components_mut().unwrap();
    value["Battery"]["Specifications"]["Chemistry"] = json!("Plutonium");

    let report = validate_components(&mut store, &system, &invalid);
    assert!(!report.is_valid);
}

#[test]
fn unavailable_schema_means_cannot_validate() {
    let system = RealSystem::new();
    let temp_dir = TempDir::new().unwrap();
    let mut store = SchemaStore::new(temp_dir.path().join("no_such_schema.json"));

    let report = validate_components(&mut store, &system, &conforming_document());
    assert!(!report.is_valid);
    assert_eq!(report.message, "Could not load validation schema");
}

#[test]
fn malformed_schema_means_cannot_validate() {
    let system = RealSystem::new();
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("vehicle_components_schema.json");
    fs::write(&schema_path, b"{broken").unwrap();

    let mut store = SchemaStore::new(schema_path);
    let report = validate_components(&mut store, &system, &conforming_document());
    assert!(!report.is_valid);
}

#[test]
fn load_failure_is_not_cached() {
    let system = RealSystem::new();
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("vehicle_components_schema.json");
    let mut store = SchemaStore::new(schema_path.clone());

    // First access fails, schema not present yet
    assert!(store.load(&system).is_none());

    // The resource appearing later is picked up without an invalidate
    fs::copy(bundled_schema_path(), &schema_path).unwrap();
    assert!(store.load(&system).is_some());
}

#[test]
fn invalidate_forces_a_reload() {
    let system = RealSystem::new();
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("vehicle_components_schema.json");
    fs::copy(bundled_schema_path(), &schema_path).unwrap();

    let mut store = SchemaStore::new(schema_path.clone());
    assert!(store.load(&system).is_some());

    // Swap the resource under the cache; only invalidate picks it up
    fs::write(&schema_path, br#"{"type": "object"}"#).unwrap();
    assert_eq!(
        store.load(&system).unwrap(),
        &serde_json::from_str::<serde_json::Value>(
            &fs::read_to_string(bundled_schema_path()).unwrap()
        )
        .unwrap()
    );

    store.invalidate();
    assert_eq!(store.load(&system).unwrap(), &json!({"type": "object"}));
}
