//! Error types for the restriction engine.

use thiserror::Error;

/// Result type for restriction operations.
pub type Result<T> = std::result::Result<T, RestrictionError>;

/// Errors that can occur while building restriction patterns.
///
/// Evaluation itself never fails: values that do not parse as the declared
/// type, missing metadata and unclassified ancestors all resolve to "no match".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestrictionError {
    /// Encoded rule string could not be decoded.
    #[error("Invalid rule syntax in '{rule}': {reason}")]
    InvalidRuleSyntax { rule: String, reason: String },

    /// Encoded rule declares an encoding version this engine does not know.
    #[error("Unsupported rule encoding: {0}")]
    UnsupportedEncoding(String),

    /// Access type is neither `allow` nor `deny`.
    #[error("Unknown access type: {0}")]
    UnknownAccessType(String),

    /// Value type is not one of `string`, `int`, `date`.
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    /// Depth level is not a non-negative integer.
    #[error("Invalid depth level: {0}")]
    InvalidLevel(String),

    /// Tree configuration validation failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration or tree snapshot could not be parsed.
    #[error("Failed to parse: {0}")]
    ParseError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RestrictionError {
    pub(crate) fn syntax(rule: &str, reason: impl Into<String>) -> Self {
        RestrictionError::InvalidRuleSyntax {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RestrictionError {
    fn from(err: serde_json::Error) -> Self {
        RestrictionError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for RestrictionError {
    fn from(err: serde_yaml::Error) -> Self {
        RestrictionError::ParseError(err.to_string())
    }
}
