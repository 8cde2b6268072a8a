//! Error types for the promptforge CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptforge operations.
///
/// Each variant maps to a specific exit code. Schema incompatibility is
/// reported as data (`SchemaValidationResult`), not as an error; the
/// `Validation` variant exists so commands can turn a failed report into
/// exit code 2 after printing it.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// A prompt document could not be parsed or is structurally invalid.
    #[error("Invalid prompt document: {0}")]
    Document(String),

    /// User provided invalid arguments or referenced a missing file.
    #[error("{0}")]
    UserError(String),

    /// Validation detected incompatibilities the caller asked to enforce.
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl ForgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ForgeError::Document(_) => exit_codes::USER_ERROR,
            ForgeError::UserError(_) => exit_codes::USER_ERROR,
            ForgeError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for promptforge operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_error_has_correct_exit_code() {
        let err = ForgeError::Document("missing title".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ForgeError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = ForgeError::ValidationError("breaking changes".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForgeError::Document("missing required field 'title'".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid prompt document: missing required field 'title'"
        );

        let err = ForgeError::ValidationError("2 breaking change(s)".to_string());
        assert_eq!(err.to_string(), "Validation failed: 2 breaking change(s)");
    }
}
