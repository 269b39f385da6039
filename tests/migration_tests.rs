//! Format migration tests

use serde_json::json;
use vehicle_components::document::ComponentDocument;
use vehicle_components::migration::{PROGRAM_VERSION_KEY, migrate};
use vehicle_components::settings::PROGRAM_VERSION;

fn document(value: serde_json::Value) -> ComponentDocument {
    serde_json::from_value(value).unwrap()
}

fn battery_specifications(document: &ComponentDocument) -> &serde_json::Value {
    &document.component("Battery").unwrap()["Specifications"]
}

#[test]
fn empty_document_stays_empty() {
    let mut empty = ComponentDocument::new();
    migrate(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn missing_battery_chemistry_gets_the_documented_default() {
    let mut migrated = document(json!({"Components": {}}));
    migrate(&mut migrated);

    assert_eq!(battery_specifications(&migrated)["Chemistry"], json!("Lipo"));
    assert_eq!(battery_specifications(&migrated)["Capacity mAh"], json!(0));
}

#[test]
fn existing_battery_chemistry_is_unchanged() {
    let mut migrated = document(json!({
        "Components": {"Battery": {"Specifications": {"Chemistry": "LiIon", "Capacity mAh": 3400}}}
    }));
    migrate(&mut migrated);

    assert_eq!(battery_specifications(&migrated)["Chemistry"], json!("LiIon"));
    assert_eq!(battery_specifications(&migrated)["Capacity mAh"], json!(3400));
}

#[test]
fn takeoff_weight_defaults_are_inserted() {
    let mut migrated = document(json!({"Components": {"Frame": {}}}));
    migrate(&mut migrated);

    let specifications = &migrated.component("Frame").unwrap()["Specifications"];
    assert_eq!(specifications["TOW min Kg"], json!(1));
    assert_eq!(specifications["TOW max Kg"], json!(1));
}

#[test]
fn deprecated_gnss_key_is_renamed() {
    let mut migrated = document(json!({
        "Components": {"GNSS receiver": {"Product": {"Manufacturer": "Holybro", "Model": "H-RTK F9P"}}}
    }));
    migrate(&mut migrated);

    let components = migrated.components().unwrap();
    assert!(!components.contains_key("GNSS receiver"));
    assert_eq!(
        components["GNSS Receiver"]["Product"]["Model"],
        json!("H-RTK F9P")
    );
}

#[test]
fn mcu_series_placeholder_is_inserted() {
    let mut migrated = document(json!({
        "Components": {"Flight Controller": {"Firmware": {"Type": "ArduCopter", "Version": "4.5.7"}}}
    }));
    migrate(&mut migrated);

    let flight_controller = migrated.component("Flight Controller").unwrap();
    assert_eq!(
        flight_controller["Specifications"]["MCU Series"],
        json!("Unknown")
    );
    // Pre-existing fields survive untouched
    assert_eq!(flight_controller["Firmware"]["Version"], json!("4.5.7"));
}

#[test]
fn format_and_program_versions_are_stamped() {
    let mut migrated = document(json!({"Components": {}}));
    migrate(&mut migrated);

    assert_eq!(migrated.format_version(), Some(1));
    assert_eq!(
        migrated.root()[PROGRAM_VERSION_KEY],
        json!(PROGRAM_VERSION)
    );
}

#[test]
fn existing_format_version_is_kept() {
    let mut migrated = document(json!({"Format version": 2, "Components": {}}));
    migrate(&mut migrated);
    assert_eq!(migrated.format_version(), Some(2));
}

#[test]
fn migration_is_idempotent() {
    let mut once = document(json!({
        "Components": {
            "GNSS receiver": {"Notes": "rooftop"},
            "Battery": {"Specifications": {"Chemistry": "LiIon"}}
        }
    }));
    migrate(&mut once);
    let mut twice = once.clone();
    migrate(&mut twice);

    assert_eq!(once, twice);
}

#[test]
fn non_mapping_subtrees_are_left_untouched() {
    let mut migrated = document(json!({"Components": {"Battery": "not configured"}}));
    migrate(&mut migrated);
    assert_eq!(migrated.component("Battery").unwrap(), &json!("not configured"));
}
