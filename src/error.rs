//! Error Taxonomy
//!
//! Four recoverable failure classes for the prediction pipeline.
//! None of these is fatal to the process; a failed prediction is
//! surfaced to the caller and never recorded in history.

use thiserror::Error;

// ============================================================================
// FIELD-LEVEL VALIDATION
// ============================================================================

/// One invalid or missing input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure listing every bad field, not just the first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Ok when no field errors were collected
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} invalid field(s): ", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// PIPELINE ERRORS
// ============================================================================

/// Errors a prediction call can surface to the caller
#[derive(Debug, Clone, Error)]
pub enum PredictError {
    /// Bad or missing input fields; local, never sent over the wire
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// Network failure or request timeout
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote classifier returned a non-success status
    #[error("classifier error ({status}): {message}")]
    Classifier { status: u16, message: String },

    /// Remote classifier returned a malformed or out-of-contract body
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl From<ValidationError> for PredictError {
    fn from(err: ValidationError) -> Self {
        PredictError::Validation(err)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_all_fields() {
        let err = ValidationError::new(vec![
            FieldError::new("email_text", "too short"),
            FieldError::new("millisecond", "must be >= 0"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 invalid field(s)"));
        assert!(msg.contains("email_text"));
        assert!(msg.contains("millisecond"));
    }

    #[test]
    fn test_empty_validation_is_ok() {
        assert!(ValidationError::new(vec![]).into_result().is_ok());
    }

    #[test]
    fn test_classifier_error_display() {
        let err = PredictError::Classifier {
            status: 500,
            message: "Prediction error".to_string(),
        };
        assert!(err.to_string().contains("500"));
    }
}
