//! Shape-preserving document mutation
//!
//! Wiping resets every leaf to a type-appropriate default without adding
//! or removing keys. Form-driven edits coerce raw strings with an ordered
//! fallback (integer, then float, then trimmed string) before assignment.

use crate::document::{COMPONENTS_KEY, ComponentDocument};
use crate::document::path::{ComponentPath, set_value_at_path};
use crate::error::ComponentError;
use serde_json::Value;

/// Version leaves keep their raw string form, never coerced to numbers
const VERSION_KEY: &str = "Version";

/// Reset every leaf of the document to its type-appropriate default
///
/// Mapping nodes are preserved and recursed into; sequences become empty
/// sequences, booleans `false`, integers `0`, floats `0.0`, strings empty
/// and anything else null. No key is added or removed at any level, so
/// applying the wipe twice equals applying it once.
pub fn wipe_to_defaults(document: &mut ComponentDocument) {
    for value in document.root_mut().values_mut() {
        wipe_value(value);
    }
}

fn wipe_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                wipe_value(child);
            }
        }
        Value::Array(seq) => seq.clear(),
        Value::Bool(flag) => *flag = false,
        Value::Number(number) => {
            let is_float = number.is_f64();
            *value = if is_float { Value::from(0.0) } else { Value::from(0) };
        }
        Value::String(text) => text.clear(),
        Value::Null => {}
    }
}

/// Coerce a raw form string into a typed leaf value
///
/// Ordered fallback: integer parse, else finite float parse, else the
/// trimmed string.
#[must_use]
pub fn coerce_leaf_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::from(integer);
    }
    if let Ok(float) = trimmed.parse::<f64>()
        && let Some(number) = serde_json::Number::from_f64(float)
    {
        return Value::Number(number);
    }
    Value::String(trimmed.to_owned())
}

/// Apply a batch of raw string edits to leaves under `Components`
///
/// Each edit is coerced with [`coerce_leaf_value`], except that leaves
/// named `Version` keep their raw string form. Paths are relative to the
/// `Components` mapping and must resolve in the document's current shape.
pub fn apply_entry_edits(
    document: &mut ComponentDocument,
    edits: &[(ComponentPath, String)],
) -> Result<(), ComponentError> {
    let components = document.components_mut().ok_or_else(|| {
        ComponentError::navigation(format!("document has no '{COMPONENTS_KEY}' mapping"))
    })?;

    for (path, raw) in edits {
        let value = if path.last() == Some(VERSION_KEY) {
            Value::String(raw.clone())
        } else {
            coerce_leaf_value(raw)
        };
        set_value_at_path(components, path, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_prefers_integer_then_float_then_string() {
        assert_eq!(coerce_leaf_value("42"), json!(42));
        assert_eq!(coerce_leaf_value("4.2"), json!(4.2));
        assert_eq!(coerce_leaf_value("  T-Motor  "), json!("T-Motor"));
        // Non-finite floats parse but cannot be JSON numbers
        assert_eq!(coerce_leaf_value("inf"), json!("inf"));
    }

    #[test]
    fn wiped_booleans_stay_booleans() {
        let mut document: ComponentDocument =
            serde_json::from_value(json!({"Components": {"Battery": {"Monitored": true}}}))
                .unwrap();
        wipe_to_defaults(&mut document);
        assert_eq!(
            document.component("Battery").unwrap(),
            &json!({"Monitored": false})
        );
    }
}
