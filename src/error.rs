//! Error types for the schema tooling.
//!
//! Validation failure itself is not an error: validators return a
//! [`crate::schema::ValidationReport`]. These types cover everything around
//! it, such as loading documents and converting failed reports for `?`
//! propagation.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::Violation;

/// The main error type for the schema tooling.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Document loading errors.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// A document did not satisfy its schema.
    #[error("Document does not satisfy the {schema} schema ({} violation(s))", .violations.len())]
    Validation {
        /// Name of the schema.
        schema: &'static str,
        /// Every failed rule, in report order.
        violations: Vec<Violation>,
    },

    /// A document file exists but could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a file or string into a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file was not found.
    #[error("Document not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported document format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat {
        /// Path to the file.
        path: PathBuf,
    },

    /// The document could not be decoded.
    #[error("Failed to parse document: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("Failed to load environment file {path}: {message}")]
    Dotenv {
        /// Path to the `.env` file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for schema tooling operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

impl SchemaError {
    /// Returns the violations carried by a validation error.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl DocumentError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldPath, ReasonCode};

    #[test]
    fn test_validation_error_display() {
        let err = SchemaError::Validation {
            schema: "deployment",
            violations: vec![
                Violation::new(
                    FieldPath::root().key("foo"),
                    ReasonCode::UnrecognizedProperty,
                    "should NOT have additional properties",
                ),
                Violation::new(
                    FieldPath::root().key("bar"),
                    ReasonCode::UnrecognizedProperty,
                    "should NOT have additional properties",
                ),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Document does not satisfy the deployment schema (2 violation(s))"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_document_error_wraps() {
        let err: SchemaError = DocumentError::parse("bad token", None).into();
        assert_eq!(err.to_string(), "Document error: Failed to parse document: bad token");
        assert!(err.violations().is_empty());
    }
}
