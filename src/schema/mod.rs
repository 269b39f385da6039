//! JSON Schema loading, caching and document validation
//!
//! The schema is a single externally-defined resource, loaded once per
//! store and cached. A missing or malformed schema degrades validation to
//! "cannot validate", never to "document is valid".

pub mod validator;

pub use validator::{ValidationReport, validate_components};

use crate::settings;
use crate::system::System;
use anyhow::{Context as _, Result, anyhow};
use jsonschema::Validator;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::error;

/// Explicit, injectable schema cache
///
/// Owned by whoever constructs the engine; populated lazily on first
/// access and re-fetchable on demand after [`SchemaStore::invalidate`].
/// Load failures are logged and yield `None` without being cached, so a
/// later access retries the resource.
pub struct SchemaStore {
    schema_path: PathBuf,
    schema: Option<Value>,
    compiled: Option<Validator>,
}

impl SchemaStore {
    /// Create a store reading the schema from `schema_path`
    #[must_use]
    pub fn new(schema_path: PathBuf) -> Self {
        Self {
            schema_path,
            schema: None,
            compiled: None,
        }
    }

    /// Create a store reading the schema from the installation-relative
    /// default location
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(settings::default_schema_path())
    }

    /// The location this store reads the schema from
    #[must_use]
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// The schema document, cached after the first successful read
    ///
    /// Returns `None` when the resource is missing or malformed; the
    /// failure is logged here and must be treated as "cannot validate"
    /// downstream.
    pub fn load(&mut self, system: &dyn System) -> Option<&Value> {
        if self.schema.is_none() {
            match read_schema(system, &self.schema_path) {
                Ok(schema) => self.schema = Some(schema),
                Err(err) => {
                    error!("{err:#}");
                    return None;
                }
            }
        }
        self.schema.as_ref()
    }

    /// The compiled schema validator, cached alongside the schema
    pub fn validator(&mut self, system: &dyn System) -> Option<&Validator> {
        if self.compiled.is_none() {
            let schema = self.load(system)?.clone();
            match compile_schema(&schema) {
                Ok(validator) => self.compiled = Some(validator),
                Err(err) => {
                    error!("{err:#}");
                    return None;
                }
            }
        }
        self.compiled.as_ref()
    }

    /// Drop the cached schema and compiled validator
    ///
    /// The next access re-reads the resource from disk.
    pub fn invalidate(&mut self) {
        self.schema = None;
        self.compiled = None;
    }
}

fn read_schema(system: &dyn System, schema_path: &Path) -> Result<Value> {
    if !system.exists(schema_path) {
        anyhow::bail!("Schema file '{}' not found", schema_path.display());
    }
    let content = system
        .read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema file '{}'", schema_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Error decoding JSON schema from file '{}'", schema_path.display()))
}

fn compile_schema(schema: &Value) -> Result<Validator> {
    jsonschema::validator_for(schema)
        .map_err(|err| anyhow!("Failed to compile JSON schema: {err}"))
}
