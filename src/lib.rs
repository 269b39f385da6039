//! Vehicle component configuration engine
//!
//! This library manages the hierarchical, versioned JSON document that
//! describes a vehicle's physical components (flight controller, frame,
//! battery, sensors) and drives downstream parameter derivation for the
//! embedded flight controller.
//!
//! ## Features
//! - Schema-validated persistence of per-vehicle component documents.
//! - Reusable named templates for single component categories, stored in
//!   a shared template store.
//! - Backward-compatible migration of older document shapes to the
//!   current format.
//! - Shape-preserving structural mutation: wipe-to-defaults and
//!   path-addressed leaf assignment.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use vehicle_components::repository::ComponentRepository;
//! use vehicle_components::schema::SchemaStore;
//! use vehicle_components::system::RealSystem;
//!
//! let system = RealSystem::new();
//! let mut repository = ComponentRepository::new(SchemaStore::at_default_location());
//! let document = repository.load(&system, Path::new("vehicles/my-quad"));
//! println!(
//!     "{} categories, firmware {}",
//!     document.components().map_or(0, |components| components.len()),
//!     repository.firmware_type(),
//! );
//! ```
//!
//! The GUI, the flight-controller link and the parameter derivation
//! pipeline are external collaborators; they consume this crate's load,
//! validate, mutate and template surfaces and push edits back through
//! path-addressed assignment and save.

pub mod document;
pub mod error;
pub mod migration;
pub mod repository;
pub mod schema;
pub mod settings;
pub mod system;
pub mod templates;
