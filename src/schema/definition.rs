//! Reading schema definitions back as field tables.
//!
//! Both schemas are JSON Schema documents. [`describe`] flattens one into a
//! row per addressable field for the `describe` command.

use serde_json::Value;

use super::engine::{type_names, PRINTABLE_FORMAT};

/// One row of a flattened schema definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    /// Field path, with `[]` for array items and `*` for map values.
    pub path: String,
    /// Accepted JSON type(s).
    pub kind: String,
    /// Human-readable constraints.
    pub constraints: String,
}

/// Flattens a definition into one row per field, in declaration order.
#[must_use]
pub fn describe(definition: &Value) -> Vec<FieldDescription> {
    let mut rows = Vec::new();
    describe_children(definition, "", &mut rows);
    rows
}

fn describe_into(node: &Value, path: &str, rows: &mut Vec<FieldDescription>) {
    rows.push(FieldDescription {
        path: path.to_string(),
        kind: type_names(node.get("type")),
        constraints: constraints_of(node),
    });
    describe_children(node, path, rows);
}

fn describe_children(node: &Value, path: &str, rows: &mut Vec<FieldDescription>) {
    if let Some(properties) = node.get("properties").and_then(Value::as_object) {
        for (name, child) in properties {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            describe_into(child, &child_path, rows);
        }
    }
    if let Some(items) = node.get("items").filter(|items| items.is_object()) {
        describe_nested(items, &format!("{path}[]"), rows);
    }
    if let Some(values) = node
        .get("additionalProperties")
        .filter(|values| values.is_object())
    {
        describe_nested(values, &format!("{path}.*"), rows);
    }
}

/// Items and map values only get a row when they carry structure or constraints.
fn describe_nested(node: &Value, path: &str, rows: &mut Vec<FieldDescription>) {
    if node.get("properties").is_some()
        || node.get("items").is_some()
        || !constraints_of(node).is_empty()
    {
        describe_into(node, path, rows);
    }
}

fn constraints_of(node: &Value) -> String {
    let number = |keyword: &str| node.get(keyword).map(Value::to_string);
    let mut parts = Vec::new();

    match (number("minLength"), number("maxLength")) {
        (Some(min), Some(max)) if min == max => parts.push(format!("length {min}")),
        (Some(min), Some(max)) => parts.push(format!("length {min}-{max}")),
        (Some(min), None) => parts.push(format!("length >= {min}")),
        (None, Some(max)) => parts.push(format!("length <= {max}")),
        (None, None) => {}
    }
    if let Some(pattern) = node.get("pattern").and_then(Value::as_str) {
        parts.push(format!("pattern {pattern}"));
    }
    match node.get("format").and_then(Value::as_str) {
        Some(PRINTABLE_FORMAT) => parts.push(String::from("no control characters")),
        Some(format) => parts.push(format!("format {format}")),
        None => {}
    }
    match (number("minimum"), number("maximum")) {
        (Some(min), Some(max)) => parts.push(format!("{min}-{max}")),
        (Some(min), None) => parts.push(format!(">= {min}")),
        (None, Some(max)) => parts.push(format!("<= {max}")),
        (None, None) => {}
    }
    if let Some(required) = node.get("required").and_then(Value::as_array) {
        let names: Vec<_> = required.iter().filter_map(Value::as_str).collect();
        parts.push(format!("requires {}", names.join(", ")));
    }
    if node.get("additionalProperties") == Some(&Value::Bool(false)) {
        parts.push(String::from("closed"));
    }

    parts.join("; ")
}
