//! Template error types

use thiserror::Error;

use super::template::Role;

/// Errors raised while building, validating or rendering templates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("{role} template variables do not match its text (undeclared: {undeclared:?}, unused: {unused:?})")]
    VariableMismatch {
        role: Role,
        /// Placeholders present in the text but not declared
        undeclared: Vec<String>,
        /// Declared names that never appear in the text
        unused: Vec<String>,
    },

    #[error("No value supplied for placeholder '{name}'")]
    MissingValue { name: String },

    #[error("Variable '{name}' is not used by any template in this prompt")]
    UnexpectedVariable { name: String },

    #[error("Expected a {expected} template, got {actual}")]
    RoleMismatch { expected: Role, actual: Role },

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),
}
