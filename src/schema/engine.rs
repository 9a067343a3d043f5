//! JSON Schema evaluation.
//!
//! Schema definitions are compiled once with the `jsonschema` crate. Its
//! errors are translated into [`Violation`]s: paths come from each error's
//! instance location, messages from the keyword that failed, and the final
//! list is ordered by where each failure sits in the input document.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError, Validator};
use serde_json::Value;

use super::patterns;
use super::violation::{FieldPath, ReasonCode, Violation};

/// Format name for email addresses.
pub const EMAIL_FORMAT: &str = "email";

/// Format name for strings free of control characters.
pub const PRINTABLE_FORMAT: &str = "printable";

/// Compiles a built-in schema definition.
///
/// # Panics
///
/// Panics if `definition` is not a valid draft-07 schema. Definitions are
/// constants of this crate and are compiled by its tests.
#[allow(clippy::expect_used)]
#[must_use]
pub fn compile(definition: &Value) -> Validator {
    let mut options = jsonschema::options();
    options
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .with_format(EMAIL_FORMAT, patterns::is_email)
        .with_format(PRINTABLE_FORMAT, |value: &str| {
            !patterns::contains_control_chars(value)
        });
    options
        .build(definition)
        .expect("built-in schema definition must compile")
}

/// Evaluates `document` and returns every violation in report order.
///
/// `definition` must be the value `validator` was compiled from; keyword
/// values such as length bounds are read back from it for messages.
#[must_use]
pub fn evaluate(validator: &Validator, definition: &Value, document: &Value) -> Vec<Violation> {
    let mut ranked = Vec::new();
    for error in validator.iter_errors(document) {
        translate(&error, definition, document, &mut ranked);
    }

    // Stable: keyword order breaks ties at one location.
    ranked.sort_by(|a, b| (&a.position, a.rank).cmp(&(&b.position, b.rank)));
    ranked.into_iter().map(|entry| entry.violation).collect()
}

struct Ranked {
    position: Vec<usize>,
    rank: u8,
    violation: Violation,
}

fn translate(
    error: &ValidationError<'_>,
    definition: &Value,
    document: &Value,
    out: &mut Vec<Ranked>,
) {
    let at = Location::resolve(document, &error.instance_path.to_string());
    let keyword = definition.pointer(&error.schema_path.to_string());

    match &error.kind {
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            for key in unexpected {
                let child = at.child(key);
                out.push(Ranked {
                    position: child.position,
                    rank: 2,
                    violation: Violation::new(
                        child.path,
                        ReasonCode::UnrecognizedProperty,
                        "should NOT have additional properties",
                    ),
                });
            }
        }
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map_or_else(|| property.to_string(), str::to_owned);
            // Sorts ahead of the object's own keys.
            out.push(Ranked {
                position: at.position,
                rank: 1,
                violation: Violation::new(
                    at.path.key(name.as_str()),
                    ReasonCode::MissingProperty,
                    format!("should have required property '{name}'"),
                ),
            });
        }
        kind => {
            let (rank, reason_code, message) = classify(kind, keyword, error);
            out.push(Ranked {
                position: at.position,
                rank,
                violation: Violation::new(at.path, reason_code, message),
            });
        }
    }
}

fn classify(
    kind: &ValidationErrorKind,
    keyword: Option<&Value>,
    error: &ValidationError<'_>,
) -> (u8, ReasonCode, String) {
    let limit = || keyword.map_or_else(String::new, Value::to_string);
    let text = || keyword.and_then(Value::as_str).unwrap_or_default().to_owned();

    match kind {
        ValidationErrorKind::Type { .. } => (
            0,
            ReasonCode::TypeMismatch,
            format!("should be {}", type_names(keyword)),
        ),
        ValidationErrorKind::MinLength { .. } => (
            3,
            ReasonCode::LengthTooShort,
            format!("should NOT be shorter than {} characters", limit()),
        ),
        ValidationErrorKind::MaxLength { .. } => (
            4,
            ReasonCode::LengthTooLong,
            format!("should NOT be longer than {} characters", limit()),
        ),
        ValidationErrorKind::Pattern { .. } => (
            5,
            ReasonCode::PatternMismatch,
            format!("should match pattern \"{}\"", text()),
        ),
        ValidationErrorKind::Format { .. } if text() == PRINTABLE_FORMAT => (
            6,
            ReasonCode::PatternMismatch,
            String::from("should not contain control characters"),
        ),
        ValidationErrorKind::Format { .. } => (
            7,
            ReasonCode::FormatMismatch,
            format!("should match format \"{}\"", text()),
        ),
        ValidationErrorKind::Minimum { .. } => {
            (8, ReasonCode::OutOfRange, format!("should be >= {}", limit()))
        }
        ValidationErrorKind::Maximum { .. } => {
            (9, ReasonCode::OutOfRange, format!("should be <= {}", limit()))
        }
        // Keywords the built-in definitions do not use.
        _ => (10, ReasonCode::TypeMismatch, error.to_string()),
    }
}

/// Renders a `type` keyword the way messages expect: `string` or `null,integer`.
#[must_use]
pub fn type_names(keyword: Option<&Value>) -> String {
    match keyword {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        _ => String::from("any"),
    }
}

/// A point in the document: its display path and its sort position.
///
/// The position lists, per segment, the key's index within its object or
/// the array index, so comparing positions orders locations as they appear
/// in the input.
struct Location<'a> {
    path: FieldPath,
    position: Vec<usize>,
    value: Option<&'a Value>,
}

impl<'a> Location<'a> {
    /// Follows a JSON pointer such as `/static/headers/0/key` into `document`.
    fn resolve(document: &'a Value, pointer: &str) -> Self {
        let mut location = Self {
            path: FieldPath::root(),
            position: Vec::new(),
            value: Some(document),
        };
        for token in pointer.split('/').skip(1) {
            let token = token.replace("~1", "/").replace("~0", "~");
            location = location.child(&token);
        }
        location
    }

    fn child(&self, token: &str) -> Self {
        match (self.value, token.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                let mut position = self.position.clone();
                position.push(index);
                Self {
                    path: self.path.index(index),
                    position,
                    value: items.get(index),
                }
            }
            (Some(Value::Object(map)), _) => {
                let mut position = self.position.clone();
                position.push(map.keys().position(|k| k == token).unwrap_or(usize::MAX));
                Self {
                    path: self.path.key(token),
                    position,
                    value: map.get(token),
                }
            }
            _ => {
                let mut position = self.position.clone();
                position.push(usize::MAX);
                Self {
                    path: self.path.key(token),
                    position,
                    value: None,
                }
            }
        }
    }
}
