//! Validation error types

use std::fmt;

/// Validation error for incoming record payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent, null, or empty
    Missing { fields: Vec<&'static str> },

    /// Body could not be read as the expected JSON object
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => {
                write!(f, "all fields are required (missing: {})", fields.join(", "))
            }
            Self::InvalidBody { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
