use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rejected field from form or record validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum PropertyAnalysisError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PropertyAnalysisError {
    /// Field-level errors carried by this error, if any.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            PropertyAnalysisError::Validation(errors) => errors.clone(),
            PropertyAnalysisError::InvalidInput { field, reason } => {
                vec![FieldError::new(field.clone(), reason.clone())]
            }
            _ => Vec::new(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for PropertyAnalysisError {
    fn from(e: serde_json::Error) -> Self {
        PropertyAnalysisError::SerializationError(e.to_string())
    }
}
