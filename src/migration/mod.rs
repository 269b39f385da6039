//! One-shot upgrade of older-shaped documents to the current format
//!
//! Deterministic and idempotent: running the migration twice yields the
//! same document as running it once, and fields that already conform are
//! never removed or overwritten.

use crate::document::{COMPONENTS_KEY, ComponentDocument, FORMAT_VERSION_KEY};
use crate::settings;
use serde_json::{Map, Value};

/// Format version stamped into documents that predate the field
pub const CURRENT_FORMAT_VERSION: i64 = 1;

/// Key of the producing-program version stamp at the document root
pub const PROGRAM_VERSION_KEY: &str = "Program version";

/// Pre-rename spelling of the GNSS receiver category
const DEPRECATED_GNSS_KEY: &str = "GNSS receiver";

/// Current spelling of the GNSS receiver category
const GNSS_KEY: &str = "GNSS Receiver";

/// Upgrade a document of unknown or older shape to the current format
///
/// Inserts missing required subtrees and fields with their documented
/// defaults, renames the deprecated GNSS receiver key and stamps the
/// producing program version. An empty document stays empty. Subtrees
/// that exist with a non-mapping shape are left untouched rather than
/// clobbered.
pub fn migrate(document: &mut ComponentDocument) {
    if document.is_empty() {
        return;
    }

    let root = document.root_mut();
    if !root.contains_key(FORMAT_VERSION_KEY) {
        root.insert(
            FORMAT_VERSION_KEY.to_owned(),
            Value::from(CURRENT_FORMAT_VERSION),
        );
    }

    if let Some(components) = ensure_object(root, COMPONENTS_KEY) {
        if let Some(battery) = ensure_object(components, "Battery")
            && let Some(specifications) = ensure_object(battery, "Specifications")
        {
            ensure_field(specifications, "Chemistry", Value::from("Lipo"));
            ensure_field(specifications, "Capacity mAh", Value::from(0));
        }

        if let Some(frame) = ensure_object(components, "Frame")
            && let Some(specifications) = ensure_object(frame, "Specifications")
        {
            ensure_field(specifications, "TOW min Kg", Value::from(1));
            ensure_field(specifications, "TOW max Kg", Value::from(1));
        }

        // Older versions used "GNSS receiver", rename it for consistency
        // with the other category names
        if let Some(renamed) = components.shift_remove(DEPRECATED_GNSS_KEY) {
            components.insert(GNSS_KEY.to_owned(), renamed);
        }

        if let Some(flight_controller) = ensure_object(components, "Flight Controller")
            && let Some(specifications) = ensure_object(flight_controller, "Specifications")
        {
            ensure_field(specifications, "MCU Series", Value::from("Unknown"));
        }
    }

    root.insert(
        PROGRAM_VERSION_KEY.to_owned(),
        Value::from(settings::PROGRAM_VERSION),
    );
}

/// The mapping under `key`, inserted empty if absent
///
/// `None` when the key already holds a non-mapping value.
fn ensure_object<'tree>(
    map: &'tree mut Map<String, Value>,
    key: &str,
) -> Option<&'tree mut Map<String, Value>> {
    map.entry(key.to_owned())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

fn ensure_field(map: &mut Map<String, Value>, key: &str, default: Value) {
    if !map.contains_key(key) {
        map.insert(key.to_owned(), default);
    }
}
