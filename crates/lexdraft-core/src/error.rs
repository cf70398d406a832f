use std::path::PathBuf;
use thiserror::Error;

use crate::numbering::NumberingError;

#[derive(Error, Debug)]
pub enum LexdraftError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    #[error("CONFIG_NOT_FOUND: '{path}' could not be read")]
    ConfigNotFound { path: PathBuf },

    // Template definition errors
    #[error("TEMPLATE_DEFINITION_INVALID: {0}")]
    TemplateDefinitionInvalid(String),

    #[error("TEMPLATE_DUPLICATE_VARIABLE: variable '{0}' is defined more than once")]
    DuplicateVariable(String),

    // Profile errors
    #[error("PROFILE_INVALID: {0}")]
    ProfileInvalid(String),

    // Numbering errors
    #[error("NUMBERING_{0}")]
    Numbering(#[from] NumberingError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for LexdraftError {
    fn from(err: serde_json::Error) -> Self {
        LexdraftError::Generic(format!("JSON error: {}", err))
    }
}

impl From<crate::template::TemplateError> for LexdraftError {
    fn from(err: crate::template::TemplateError) -> Self {
        LexdraftError::Generic(format!("Template error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, LexdraftError>;
