//! Component configuration document model
//!
//! A vehicle's component configuration is a tree of mappings terminating
//! in scalar leaves, rooted at `"Format version"` and `"Components"`.
//! Field order is preserved across load, mutation and save.

pub mod mutate;
pub mod path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

/// Key of the format version field at the document root
pub const FORMAT_VERSION_KEY: &str = "Format version";

/// Key of the components mapping at the document root
pub const COMPONENTS_KEY: &str = "Components";

/// A vehicle's component configuration document
///
/// An ordered JSON object; the empty document is the normal state for a
/// vehicle directory that has not been configured yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentDocument {
    root: Map<String, Value>,
}

impl ComponentDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document has no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The document root mapping
    #[must_use]
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Mutable access to the document root mapping
    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// The `"Format version"` field, when present and integral
    #[must_use]
    pub fn format_version(&self) -> Option<i64> {
        self.root.get(FORMAT_VERSION_KEY).and_then(Value::as_i64)
    }

    /// The `"Components"` mapping, when present
    #[must_use]
    pub fn components(&self) -> Option<&Map<String, Value>> {
        self.root.get(COMPONENTS_KEY).and_then(Value::as_object)
    }

    /// Mutable access to the `"Components"` mapping, when present
    pub fn components_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(COMPONENTS_KEY).and_then(Value::as_object_mut)
    }

    /// The `"Components"` mapping, inserted empty if absent
    ///
    /// An existing non-mapping value under the key is replaced; the
    /// components subtree is structurally a mapping by contract.
    pub fn ensure_components(&mut self) -> &mut Map<String, Value> {
        let entry = self
            .root
            .entry(COMPONENTS_KEY.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("components entry was just replaced with a mapping"),
        }
    }

    /// One component category subtree, when present
    #[must_use]
    pub fn component(&self, category: &str) -> Option<&Value> {
        self.components().and_then(|components| components.get(category))
    }

    /// The whole document as a JSON value (for schema validation)
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

impl From<Map<String, Value>> for ComponentDocument {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

/// Serialize with 4-space indentation and `\n` line endings
///
/// The on-disk document format: deterministic field order (insertion
/// order), fixed indentation, whole-file overwrite.
pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_preserves_field_order() {
        let text = r#"{"Format version": 1, "Components": {"Frame": {}, "Battery": {}}}"#;
        let document: ComponentDocument = serde_json::from_str(text).unwrap();
        let categories: Vec<&String> = document.components().unwrap().keys().collect();
        assert_eq!(categories, ["Frame", "Battery"]);
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(serde_json::from_str::<ComponentDocument>("[1, 2]").is_err());
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let document: ComponentDocument =
            serde_json::from_value(json!({"Components": {"Frame": {"Notes": ""}}})).unwrap();
        let encoded = String::from_utf8(to_pretty_json(&document).unwrap()).unwrap();
        assert!(encoded.contains("\n    \"Components\""));
        assert!(encoded.contains("\n        \"Frame\""));
        assert!(!encoded.contains('\t'));
    }
}
