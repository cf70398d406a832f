//! Template error types

use std::fmt;

/// Template compilation and rendering errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Key not found in data context (strict mode only)
    UndefinedKey {
        /// The key that was not found
        key: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// Malformed template syntax
    MalformedSyntax {
        /// Error message
        message: String,
        /// Line number where the error occurred
        line: usize,
    },

    /// `{{#name}}` without a matching `{{/name}}`
    UnclosedBlock { name: String, line: usize },

    /// `{{/name}}` that does not close the innermost open block
    UnexpectedBlockEnd { name: String, line: usize },

    /// Helper or block name that does not exist
    UnknownHelper { name: String, line: usize },

    /// Helper called with arguments it cannot use
    HelperArgument {
        helper: String,
        message: String,
        line: usize,
    },

    /// Object used directly in a placeholder (must use nested keys)
    ObjectInPlaceholder { key: String, line: usize },

    /// Numbering helper used outside its block, or a numbering definition failed
    Numbering { message: String, line: usize },

    /// Template rendering timed out (malformed input protection)
    Timeout {
        /// Maximum allowed duration
        max_duration: std::time::Duration,
        /// Actual elapsed time
        elapsed: std::time::Duration,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedKey { key, line } => {
                write!(f, "Undefined key '{}' at line {}", key, line)
            }
            TemplateError::MalformedSyntax { message, line } => {
                write!(f, "Malformed syntax at line {}: {}", line, message)
            }
            TemplateError::UnclosedBlock { name, line } => {
                write!(
                    f,
                    "Unclosed block '{}' opened at line {}. Add {{{{/{}}}}}",
                    name, line, name
                )
            }
            TemplateError::UnexpectedBlockEnd { name, line } => {
                write!(
                    f,
                    "Unexpected {{{{/{}}}}} at line {} without matching {{{{#{}}}}}",
                    name, line, name
                )
            }
            TemplateError::UnknownHelper { name, line } => {
                write!(f, "Unknown helper '{}' at line {}", name, line)
            }
            TemplateError::HelperArgument {
                helper,
                message,
                line,
            } => {
                write!(f, "Helper '{}' at line {}: {}", helper, line, message)
            }
            TemplateError::ObjectInPlaceholder { key, line } => {
                write!(
                    f,
                    "Object '{}' cannot be used directly in placeholder at line {}. Use nested keys like {}.field",
                    key, line, key
                )
            }
            TemplateError::Numbering { message, line } => {
                write!(f, "Numbering error at line {}: {}", line, message)
            }
            TemplateError::Timeout {
                max_duration,
                elapsed,
            } => {
                write!(
                    f,
                    "Template rendering timed out after {:.2}s (max: {:.2}s). Check for runaway {{{{#each}}}} blocks.",
                    elapsed.as_secs_f64(),
                    max_duration.as_secs_f64()
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}
