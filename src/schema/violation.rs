//! Violation records and validation reports.
//!
//! A validation call never fails: it always produces a [`ValidationReport`]
//! holding the ordered list of every rule that did not hold.

use serde::Serialize;
use std::fmt;

use crate::error::{Result, SchemaError};

/// Why a single rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    /// The value has the wrong JSON type.
    TypeMismatch,
    /// A string did not match the required pattern.
    PatternMismatch,
    /// A string did not match a named format such as `email`.
    FormatMismatch,
    /// A string is shorter than the lower length bound.
    LengthTooShort,
    /// A string is longer than the upper length bound.
    LengthTooLong,
    /// A number is outside its permitted range.
    OutOfRange,
    /// An object carries a key outside its recognized set.
    UnrecognizedProperty,
    /// An object is missing a key it must carry.
    MissingProperty,
    /// A field is present without the field it depends on.
    MissingDependency,
}

impl ReasonCode {
    /// Returns the wire name of the reason code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type-mismatch",
            Self::PatternMismatch => "pattern-mismatch",
            Self::FormatMismatch => "format-mismatch",
            Self::LengthTooShort => "length-too-short",
            Self::LengthTooLong => "length-too-long",
            Self::OutOfRange => "out-of-range",
            Self::UnrecognizedProperty => "unrecognized-property",
            Self::MissingProperty => "missing-property",
            Self::MissingDependency => "missing-dependency",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a document, e.g. `static.headers[0].key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path extended by an object key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path extended by an array index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single reported rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Where in the document the rule failed.
    pub field_path: FieldPath,
    /// Which kind of rule failed.
    pub reason_code: ReasonCode,
    /// Human-readable description taken from the failing rule.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub fn new(field_path: FieldPath, reason_code: ReasonCode, message: impl Into<String>) -> Self {
        Self {
            field_path,
            reason_code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.field_path, self.message, self.reason_code)
    }
}

/// Outcome of validating one document against one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Name of the schema the document was checked against.
    pub schema: &'static str,
    /// Whether the document passed.
    pub valid: bool,
    /// Every failed rule, in report order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Builds a report from collected violations.
    #[must_use]
    pub fn new(schema: &'static str, violations: Vec<Violation>) -> Self {
        Self {
            schema,
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Returns true if no rule failed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Converts a failed report into an error, for callers that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Validation`] if the document did not pass.
    pub fn into_result(self) -> Result<Self> {
        if self.valid {
            Ok(self)
        } else {
            Err(SchemaError::Validation {
                schema: self.schema,
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        let path = FieldPath::root()
            .key("static")
            .key("headers")
            .index(0)
            .key("headers")
            .index(2)
            .key("value");
        assert_eq!(path.to_string(), "static.headers[0].headers[2].value");
        assert_eq!(FieldPath::root().to_string(), "(root)");
        assert_eq!(FieldPath::root().key("username").to_string(), "username");
    }

    #[test]
    fn test_violation_serializes_camel_case() {
        let violation = Violation::new(
            FieldPath::root().key("slot"),
            ReasonCode::MissingDependency,
            "requires cloud",
        );
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["fieldPath"], "slot");
        assert_eq!(json["reasonCode"], "missing-dependency");
        assert_eq!(json["message"], "requires cloud");
    }

    #[test]
    fn test_report_into_result() {
        let ok = ValidationReport::new("user", vec![]);
        assert!(ok.into_result().is_ok());

        let failed = ValidationReport::new(
            "user",
            vec![Violation::new(
                FieldPath::root().key("name"),
                ReasonCode::LengthTooShort,
                "should NOT be shorter than 1 characters",
            )],
        );
        assert!(!failed.is_valid());
        match failed.into_result() {
            Err(SchemaError::Validation { schema, violations }) => {
                assert_eq!(schema, "user");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
