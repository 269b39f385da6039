//! Discovery of complete vehicle templates below the templates base
//! directory

use crate::document::ComponentDocument;
use crate::settings;
use crate::system::System;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error};

/// Summary of one discovered vehicle template directory
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOverview {
    /// The template's component categories and their subtrees
    pub components: Map<String, Value>,
}

/// Find all subdirectories of `base_dir` containing a component document
/// and summarize each
///
/// Keys are the subdirectory paths relative to `base_dir`. Directories
/// whose document is empty or unreadable are skipped.
#[must_use]
pub fn template_overviews(
    system: &dyn System,
    base_dir: &Path,
) -> IndexMap<String, TemplateOverview> {
    let mut overviews = IndexMap::new();

    let entries = match system.walk_dir(base_dir) {
        Ok(entries) => entries,
        Err(err) => {
            error!("Failed to walk templates directory '{}': {err}", base_dir.display());
            return overviews;
        }
    };

    for entry in entries {
        if !entry.is_file
            || entry.path.file_name().and_then(|name| name.to_str())
                != Some(settings::VEHICLE_COMPONENTS_JSON)
        {
            continue;
        }

        let Some(template_dir) = entry.path.parent() else {
            continue;
        };
        let relative = template_dir
            .strip_prefix(base_dir)
            .unwrap_or(template_dir)
            .display()
            .to_string();

        let content = match system.read_to_string(&entry.path) {
            Ok(content) => content,
            Err(err) => {
                error!("Failed to read template '{}': {err}", entry.path.display());
                continue;
            }
        };
        let document: ComponentDocument = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(err) => {
                error!(
                    "Error decoding JSON data from file '{}': {err}",
                    entry.path.display()
                );
                continue;
            }
        };

        if document.is_empty() {
            debug!("Skipping empty template in '{relative}'");
            continue;
        }

        let components = document.components().cloned().unwrap_or_default();
        overviews.insert(relative, TemplateOverview { components });
    }

    overviews
}
