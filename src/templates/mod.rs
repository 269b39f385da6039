//! Reusable component templates
//!
//! Named snapshots of one component category's subtree, stored in a
//! shared template store file independent of any single vehicle's
//! document. Template application never mutates the store; template
//! saving never mutates the live document.

pub mod overview;

pub use overview::{TemplateOverview, template_overviews};

use crate::document::path::{ComponentPath, resolve};
use crate::document::{ComponentDocument, to_pretty_json};
use crate::error::ComponentError;
use crate::settings;
use crate::system::System;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::error;

/// A named, reusable snapshot of one component category's subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub data: Value,
}

/// Mapping from component category to its ordered template sequence
pub type TemplateStore = IndexMap<String, Vec<Template>>;

/// Outcome of saving a component snapshot into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSaveOutcome {
    /// A new template was appended to the category
    Appended,
    /// An existing template of the same name was replaced
    Overwritten,
    /// A template of the same name exists and the caller did not confirm
    /// the overwrite; the store is unchanged
    ConfirmationRequired,
}

/// Persists and retrieves the shared template store
pub struct TemplateManager {
    templates_dir: PathBuf,
}

impl TemplateManager {
    /// Create a manager over the given templates base directory
    #[must_use]
    pub fn new(templates_dir: PathBuf) -> Self {
        Self { templates_dir }
    }

    /// Create a manager over the shared per-user templates directory
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(settings::templates_base_dir())
    }

    /// Location of the template store file
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.templates_dir.join(settings::VEHICLE_COMPONENTS_TEMPLATE_JSON)
    }

    /// Read the shared template store
    ///
    /// A missing or malformed store file is logged and yields an empty
    /// store; the caller keeps operating.
    #[must_use]
    pub fn load_templates(&self, system: &dyn System) -> TemplateStore {
        let filepath = self.store_path();
        if !system.exists(&filepath) {
            error!("Templates file '{}' not found", filepath.display());
            return TemplateStore::new();
        }

        let content = match system.read_to_string(&filepath) {
            Ok(content) => content,
            Err(err) => {
                error!("Failed to read templates file '{}': {err}", filepath.display());
                return TemplateStore::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(store) => store,
            Err(err) => {
                error!(
                    "Error decoding JSON templates from file '{}': {err}",
                    filepath.display()
                );
                TemplateStore::new()
            }
        }
    }

    /// Overwrite the template store file, creating the templates
    /// directory on demand
    pub fn save_templates(
        &self,
        system: &dyn System,
        templates: &TemplateStore,
    ) -> Result<(), ComponentError> {
        let filepath = self.store_path();

        system.create_dir_all(&self.templates_dir).map_err(|err| {
            let failure = ComponentError::from_write_error(&err, &filepath, &self.templates_dir);
            error!("{failure}");
            failure
        })?;

        let encoded = to_pretty_json(templates)
            .map_err(|err| ComponentError::serialization(err.to_string()))?;

        system.write(&filepath, &encoded).map_err(|err| {
            let failure = ComponentError::from_write_error(&err, &filepath, &self.templates_dir);
            error!("{failure}");
            failure
        })
    }
}

/// Whether saving `name` into `category` would replace an existing
/// template
///
/// Pure decision function; the confirmation interaction itself belongs to
/// the presentation collaborator.
#[must_use]
pub fn would_overwrite(templates: &TemplateStore, category: &str, name: &str) -> bool {
    templates
        .get(category)
        .is_some_and(|entries| entries.iter().any(|template| template.name == name))
}

/// Snapshot `document.Components[category]` into the store under `name`
///
/// A duplicate name is only replaced when the caller passed `overwrite`;
/// otherwise the store is left unchanged and confirmation is requested.
/// The live document is never mutated.
pub fn save_as_template(
    templates: &mut TemplateStore,
    document: &ComponentDocument,
    category: &str,
    name: &str,
    overwrite: bool,
) -> Result<TemplateSaveOutcome, ComponentError> {
    let data = document
        .component(category)
        .filter(|data| data.as_object().is_none_or(|map| !map.is_empty()))
        .cloned()
        .ok_or_else(|| ComponentError::template(format!("No data for component: {category}")))?;

    let entries = templates.entry(category.to_owned()).or_default();
    let new_template = Template {
        name: name.to_owned(),
        data,
    };

    if let Some(position) = entries.iter().position(|template| template.name == name) {
        if !overwrite {
            return Ok(TemplateSaveOutcome::ConfirmationRequired);
        }
        entries[position] = new_template;
        return Ok(TemplateSaveOutcome::Overwritten);
    }

    entries.push(new_template);
    Ok(TemplateSaveOutcome::Appended)
}

/// Replace `document.Components[category]` wholesale with the template's
/// subtree
///
/// Structural replacement, not a merge; sibling categories are untouched
/// and the template itself is never mutated.
pub fn apply_template(document: &mut ComponentDocument, category: &str, template: &Template) {
    document
        .ensure_components()
        .insert(category.to_owned(), template.data.clone());
}

/// Values for presentation fields bound under a freshly applied subtree
///
/// Paths whose key sequence cannot be resolved in the new subtree yield
/// `None` and are left unset by the caller; template shapes legitimately
/// differ per instance.
#[must_use]
pub fn refresh_bound_paths<'tree>(
    template_data: &'tree Value,
    bound_paths: &[ComponentPath],
) -> Vec<(ComponentPath, Option<&'tree Value>)> {
    bound_paths
        .iter()
        .map(|path| (path.clone(), resolve(template_data, path)))
        .collect()
}
