//! Error types for specification finalization.
//!
//! Both kinds signal a defect in the discovery code that drives a builder,
//! not bad user input; callers are expected to surface their own
//! diagnostics before finalizing.

use valforge_core::CoreError;

/// Result alias for specification operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors from finalizing a specification or property descriptor.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("{entity}: required field `{field}` not set")]
    MissingRequiredField { entity: &'static str, field: String },

    #[error("{artifact} must be nested in {expected}, but its enclosing scope is {actual}")]
    StructuralMismatch {
        artifact: &'static str,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SpecError {
    pub(crate) fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        SpecError::MissingRequiredField {
            entity,
            field: field.into(),
        }
    }

    /// Name of the missing field, if this is a `MissingRequiredField` error.
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            SpecError::MissingRequiredField { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}
