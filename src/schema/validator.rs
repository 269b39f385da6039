//! Document validation against the component schema

use crate::document::ComponentDocument;
use crate::schema::SchemaStore;
use crate::system::System;

/// Outcome of validating a document against the schema
///
/// Validation failure is non-fatal everywhere it is consumed: documents
/// that fail validation are still returned to the caller for display and
/// repair, never discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    fn invalid<S: Into<String>>(message: S) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Validate component data against the schema
///
/// An unavailable schema yields an invalid report with a fixed message;
/// otherwise the first validation error's message is reported.
pub fn validate_components(
    store: &mut SchemaStore,
    system: &dyn System,
    document: &ComponentDocument,
) -> ValidationReport {
    let Some(validator) = store.validator(system) else {
        return ValidationReport::invalid("Could not load validation schema");
    };

    let instance = document.to_value();
    match validator.validate(&instance) {
        Ok(()) => ValidationReport::valid(),
        Err(err) => ValidationReport::invalid(format!("Validation error: {err}")),
    }
}
