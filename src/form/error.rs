//! Errors surfaced to the user by a form session

use thiserror::Error;

/// A single validation failure, bound to one field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required.")]
    Required { field_id: String, label: String },

    #[error("{label} cannot be negative.")]
    Negative { field_id: String, label: String },

    #[error("{label} only accepts whole numbers.")]
    NotWholeNumber { field_id: String, label: String },

    #[error("{label} must be at least {min} characters.")]
    TooShort {
        field_id: String,
        label: String,
        min: usize,
    },
}

impl ValidationError {
    /// Id of the offending field
    pub fn field_id(&self) -> &str {
        match self {
            Self::Required { field_id, .. }
            | Self::Negative { field_id, .. }
            | Self::NotWholeNumber { field_id, .. }
            | Self::TooShort { field_id, .. } => field_id,
        }
    }
}

/// Error currently displayed by the session
///
/// Load and submission failures deliberately carry no transport detail;
/// the underlying client error is only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Failed to load the form. Please try again later.")]
    SchemaLoad,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save the form. Please try again.")]
    Submission,
}

impl FormError {
    /// Field the error is bound to, if any
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(e.field_id()),
            Self::SchemaLoad | Self::Submission => None,
        }
    }
}
