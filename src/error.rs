//! Error types for the editing engine and its adapters.
//!
//! [`EditError`] covers the conditions engine operations check themselves.
//! [`SessionError`] wraps it together with the failures of the command
//! parser, codecs and configuration loader.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("{0} not present in the application")]
    NameNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch: expected {}x{}, found {}x{}", expected.0, expected.1, found.0, found.1)]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Invalid pixel array shape {0:?}: expected (height, width, 3)")]
    InvalidShape(Vec<usize>),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Wrong number of arguments for {command}: got {found} tokens")]
    Arity { command: String, found: usize },

    #[error("{0} cannot be parsed into Integer")]
    InvalidNumber(String),

    #[error("Script {0} is already running")]
    ScriptRecursion(String),

    #[error("Invalid PPM data: {0}")]
    Ppm(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_not_found_message() {
        let error = EditError::NameNotFound("koala".to_string());
        assert_eq!(error.to_string(), "koala not present in the application");
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let error = EditError::DimensionMismatch {
            expected: (4, 3),
            found: (2, 2),
        };
        assert_eq!(error.to_string(), "Dimension mismatch: expected 4x3, found 2x2");
    }

    #[test]
    fn test_session_error_from_edit_error() {
        let error: SessionError = EditError::InvalidParameter("percentage 120".to_string()).into();
        match error {
            SessionError::Edit(EditError::InvalidParameter(_)) => {}
            other => panic!("Expected Edit variant, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number_message() {
        let error = SessionError::InvalidNumber("ten".to_string());
        assert_eq!(error.to_string(), "ten cannot be parsed into Integer");
    }
}
