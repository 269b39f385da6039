//! Path-addressed navigation into nested component mappings
//!
//! Paths are ordered key sequences derived from the document's own
//! current shape. Navigation (`resolve`) is lenient and pure; mutation
//! (`set_value_at_path`) fails loudly when an intermediate key is absent.

use crate::error::ComponentError;
use serde_json::{Map, Value};
use std::fmt;

/// An ordered sequence of keys locating a node in a component tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ComponentPath(Vec<String>);

impl ComponentPath {
    /// Build a path from key segments
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// The key segments, outermost first
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// The final key segment, when the path is non-empty
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether the path has no segments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for ComponentPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Resolve a path against a tree, yielding the addressed node if every
/// key exists
///
/// Lenient by design: template shapes legitimately differ per instance,
/// so an unresolvable path is `None`, not an error.
#[must_use]
pub fn resolve<'tree>(tree: &'tree Value, path: &ComponentPath) -> Option<&'tree Value> {
    let mut current = tree;
    for key in path.keys() {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Assign `value` at the final key of `path`, descending through existing
/// mapping nodes
///
/// The final key is created if absent; an absent or non-mapping
/// intermediate node is a navigation error, since paths must be derived
/// from the tree's own current shape.
pub fn set_value_at_path(
    tree: &mut Map<String, Value>,
    path: &ComponentPath,
    value: Value,
) -> Result<(), ComponentError> {
    let keys = path.keys();
    let (last, intermediate) = keys.split_last().ok_or_else(|| {
        ComponentError::navigation("cannot set a value at an empty path")
    })?;

    let mut current = tree;
    for (depth, key) in intermediate.iter().enumerate() {
        let node = current.get_mut(key).ok_or_else(|| {
            ComponentError::navigation(format!(
                "key '{}' not found while descending '{path}'",
                keys[..=depth].join(".")
            ))
        })?;
        current = node.as_object_mut().ok_or_else(|| {
            ComponentError::navigation(format!(
                "key '{}' is not a mapping while descending '{path}'",
                keys[..=depth].join(".")
            ))
        })?;
    }

    current.insert(last.clone(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_follows_nested_keys() {
        let tree = json!({"Firmware": {"Type": "ArduCopter"}});
        let path = ComponentPath::new(["Firmware", "Type"]);
        assert_eq!(resolve(&tree, &path), Some(&json!("ArduCopter")));
    }

    #[test]
    fn resolve_missing_key_is_none() {
        let tree = json!({"Firmware": {"Type": "ArduCopter"}});
        assert_eq!(resolve(&tree, &ComponentPath::new(["Firmware", "Version"])), None);
    }

    #[test]
    fn set_value_fails_on_absent_intermediate_key() {
        let mut tree = serde_json::Map::new();
        let err = set_value_at_path(
            &mut tree,
            &ComponentPath::new(["Battery", "Specifications", "Chemistry"]),
            json!("Lipo"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Battery"));
    }
}
