//! Error handling module
//!
//! Defines the crate error taxonomy for persistence, navigation and
//! template operations

pub mod types;

pub use types::*;
