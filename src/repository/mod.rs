//! Load, save and derived queries for a vehicle's component document
//!
//! The repository owns the in-memory document for one vehicle at a time,
//! delegates validation to the schema store and absorbs every file and
//! parse failure into a logged message plus a sentinel return value.

use crate::document::path::{ComponentPath, set_value_at_path};
use crate::document::{COMPONENTS_KEY, ComponentDocument, to_pretty_json};
use crate::error::ComponentError;
use crate::schema::{SchemaStore, ValidationReport, validate_components};
use crate::settings;
use crate::system::System;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// The closed set of recognized firmware identifiers, in canonical order
pub const SUPPORTED_FIRMWARE_TYPES: &[&str] = &[
    "AP_Periph",
    "AntennaTracker",
    "ArduCopter",
    "ArduPlane",
    "ArduSub",
    "Blimp",
    "Heli",
    "Rover",
    "SITL",
];

/// A `major.minor.patch` triple; surrounding text is discarded
const FIRMWARE_VERSION_PATTERN: &str = r"\d+\.\d+\.\d+";

/// Loads and saves one vehicle's component configuration document
pub struct ComponentRepository {
    schema: SchemaStore,
    document: ComponentDocument,
}

impl ComponentRepository {
    /// Create a repository validating against the given schema store
    #[must_use]
    pub fn new(schema: SchemaStore) -> Self {
        Self {
            schema,
            document: ComponentDocument::new(),
        }
    }

    /// The currently loaded document
    #[must_use]
    pub fn document(&self) -> &ComponentDocument {
        &self.document
    }

    /// Mutable access to the currently loaded document
    pub fn document_mut(&mut self) -> &mut ComponentDocument {
        &mut self.document
    }

    /// Mutable access to the injected schema store
    pub fn schema_store_mut(&mut self) -> &mut SchemaStore {
        &mut self.schema
    }

    /// Location of the component document inside a vehicle directory
    #[must_use]
    pub fn document_path(vehicle_dir: &Path) -> PathBuf {
        vehicle_dir.join(settings::VEHICLE_COMPONENTS_JSON)
    }

    /// Read the component document from a vehicle directory
    ///
    /// An absent file is the normal new-vehicle case and yields an empty
    /// document; malformed JSON is logged and yields an empty document.
    /// A document that fails schema validation is logged and still
    /// returned, so the caller can display and repair it. The result
    /// becomes the repository's current document.
    pub fn load(&mut self, system: &dyn System, vehicle_dir: &Path) -> ComponentDocument {
        let filepath = Self::document_path(vehicle_dir);
        let mut data = ComponentDocument::new();

        if system.exists(&filepath) {
            match system.read_to_string(&filepath) {
                Ok(content) => match serde_json::from_str::<ComponentDocument>(&content) {
                    Ok(parsed) => {
                        let report = validate_components(&mut self.schema, system, &parsed);
                        if !report.is_valid {
                            error!(
                                "Invalid vehicle components file '{}': {}",
                                filepath.display(),
                                report.message
                            );
                        }
                        data = parsed;
                    }
                    Err(err) => {
                        error!(
                            "Error decoding JSON data from file '{}': {err}",
                            filepath.display()
                        );
                    }
                },
                Err(err) => {
                    error!("Error reading file '{}': {err}", filepath.display());
                }
            }
        } else {
            // Normal users do not need this information
            debug!(
                "File '{}' not found in {}",
                settings::VEHICLE_COMPONENTS_JSON,
                vehicle_dir.display()
            );
        }

        self.document = data.clone();
        data
    }

    /// Validate a document against the schema without loading it
    pub fn validate(
        &mut self,
        system: &dyn System,
        document: &ComponentDocument,
    ) -> ValidationReport {
        validate_components(&mut self.schema, system, document)
    }

    /// Overwrite the component document in a vehicle directory
    ///
    /// Whole-file overwrite with deterministic field order, 4-space
    /// indentation and `\n` line endings. Failure causes are
    /// distinguished and surfaced as typed errors with user-presentable
    /// messages; nothing panics past this boundary.
    pub fn save(
        &self,
        system: &dyn System,
        document: &ComponentDocument,
        vehicle_dir: &Path,
    ) -> Result<(), ComponentError> {
        let filepath = Self::document_path(vehicle_dir);

        let encoded = to_pretty_json(document).map_err(|err| {
            let failure = ComponentError::serialization(err.to_string());
            error!("{failure}");
            failure
        })?;

        system.write(&filepath, &encoded).map_err(|err| {
            let failure = ComponentError::from_write_error(&err, &filepath, vehicle_dir);
            error!("{failure}");
            failure
        })
    }

    /// Assign a leaf value by path, relative to the `Components` mapping
    /// of the current document
    pub fn set_component_value(
        &mut self,
        path: &ComponentPath,
        value: Value,
    ) -> Result<(), ComponentError> {
        let components = self.document.components_mut().ok_or_else(|| {
            ComponentError::navigation(format!("document has no '{COMPONENTS_KEY}' mapping"))
        })?;
        set_value_at_path(components, path, value)
    }

    /// The flight controller firmware type of the current document
    ///
    /// Empty when the field is absent; a present but unrecognized type is
    /// a soft validation failure, logged and yielding empty.
    #[must_use]
    pub fn firmware_type(&self) -> String {
        let Some(fw_type) = self.firmware_field("Type") else {
            return String::new();
        };
        if SUPPORTED_FIRMWARE_TYPES.contains(&fw_type.as_str()) {
            return fw_type;
        }
        warn!(
            "Firmware type {fw_type} in {} is not supported",
            settings::VEHICLE_COMPONENTS_JSON
        );
        String::new()
    }

    /// The flight controller firmware version of the current document
    ///
    /// The leading `major.minor.patch` token of the version string, with
    /// any surrounding text discarded; a present but non-conforming
    /// string is logged and yields empty.
    #[must_use]
    pub fn firmware_version(&self) -> String {
        let Some(raw) = self.firmware_field("Version") else {
            return String::new();
        };
        match extract_version(&raw) {
            Some(version) => version,
            None => {
                warn!(
                    "FW version string {raw} in {} is invalid",
                    settings::VEHICLE_COMPONENTS_JSON
                );
                String::new()
            }
        }
    }

    /// The fixed, closed set of recognized firmware identifiers
    #[must_use]
    pub fn supported_firmware_types() -> &'static [&'static str] {
        SUPPORTED_FIRMWARE_TYPES
    }

    /// A non-empty string leaf under `Flight Controller.Firmware`
    fn firmware_field(&self, key: &str) -> Option<String> {
        self.document
            .component("Flight Controller")?
            .get("Firmware")?
            .get(key)?
            .as_str()
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    }
}

/// Extract the first `major.minor.patch` token from a version string
fn extract_version(raw: &str) -> Option<String> {
    let Ok(pattern) = Regex::new(FIRMWARE_VERSION_PATTERN) else {
        return None;
    };
    pattern.find(raw).map(|token| token.as_str().to_owned())
}
