//! Fixed filenames, program version and well-known directories
//!
//! The analogue of a desktop installation's program settings: where the
//! schema resource lives, where the shared templates base directory is,
//! and which filenames the engine reads and writes.

use std::path::PathBuf;

/// Per-vehicle component configuration document filename
pub const VEHICLE_COMPONENTS_JSON: &str = "vehicle_components.json";

/// Schema resource filename, located alongside the installation
pub const VEHICLE_COMPONENTS_SCHEMA_JSON: &str = "vehicle_components_schema.json";

/// Shared template store filename
pub const VEHICLE_COMPONENTS_TEMPLATE_JSON: &str = "vehicle_components_template.json";

/// Version stamped into migrated documents as `"Program version"`
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared (non-vehicle-specific) templates base directory
///
/// Lives under the per-user data directory; falls back to a relative
/// `templates` directory when the platform exposes no data directory.
#[must_use]
pub fn templates_base_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("templates"),
        |dir| dir.join("vehicle-components").join("templates"),
    )
}

/// Default location of the schema resource, relative to the installed
/// executable
#[must_use]
pub fn default_schema_path() -> PathBuf {
    let resource_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_default();
    resource_dir.join(VEHICLE_COMPONENTS_SCHEMA_JSON)
}
