//! Deployment configuration schema.
//!
//! Recognized top-level keys: `features`, `slot`, `limits`, `env`, `build`,
//! `static` and `github`. None is required, and any other key is reported
//! as an unrecognized property.
//!
//! A `slot` may only be set when `features.cloud` is `"v2"`. That rule is a
//! cross-field invariant checked after the JSON Schema pass, independently
//! of whether the slot key itself is well formed.

use jsonschema::Validator;
use serde_json::{json, Value};
use std::sync::LazyLock;

use super::engine::{self, PRINTABLE_FORMAT};
use super::patterns::{HEADER_NAME, SLOT_KEY};
use super::violation::{FieldPath, ReasonCode, Violation};
use super::Schema;
use crate::document::DeploymentConfig;

/// Schema name used in reports.
pub const NAME: &str = "deployment";

/// The `features.cloud` value that unlocks slot keys.
pub const CLOUD_V2: &str = "v2";

static DEFINITION: LazyLock<Value> = LazyLock::new(build_definition);
static VALIDATOR: LazyLock<Validator> = LazyLock::new(|| engine::compile(&DEFINITION));

/// Returns the deployment schema as a JSON Schema (draft-07) document.
#[must_use]
pub fn definition() -> &'static Value {
    &DEFINITION
}

/// Validator for deployment configuration documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentConfigSchema;

impl Schema for DeploymentConfigSchema {
    type Document = DeploymentConfig;

    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> &Value {
        definition()
    }

    fn validator(&self) -> &Validator {
        &VALIDATOR
    }

    fn invariants(&self, document: &Value, violations: &mut Vec<Violation>) {
        let Some(map) = document.as_object() else {
            return;
        };
        if !map.contains_key("slot") {
            return;
        }

        let cloud = map
            .get("features")
            .and_then(|features| features.get("cloud"))
            .and_then(Value::as_str);

        if cloud != Some(CLOUD_V2) {
            violations.push(Violation::new(
                FieldPath::root().key("slot"),
                ReasonCode::MissingDependency,
                format!(
                    "should have property features.cloud equal to \"{CLOUD_V2}\" when property slot is present"
                ),
            ));
        }
    }
}

fn build_definition() -> Value {
    json!({
        "type": "object",
        "properties": {
            "features": {
                "type": "object",
                "additionalProperties": { "type": ["string", "number", "boolean"] }
            },
            "slot": { "type": "string", "pattern": SLOT_KEY.as_str() },
            "limits": {
                "type": "object",
                "properties": {
                    "duration": { "type": "number" },
                    "maxConcurrentReqs": { "type": "number" },
                    "timeout": { "type": "number" }
                },
                "additionalProperties": false
            },
            "env": env(),
            "build": {
                "type": "object",
                "properties": { "env": env() },
                "additionalProperties": false
            },
            "static": static_files(),
            "github": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "aliasing": { "type": "boolean" }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}

/// Either `{NAME: "value"}` or `["NAME"]` (names passed through from the environment).
fn env() -> Value {
    json!({
        "type": ["object", "array"],
        "additionalProperties": { "type": "string" },
        "items": { "type": "string" }
    })
}

/// `true`/`false`, or a list of paths the toggle applies to.
fn path_toggle() -> Value {
    json!({
        "type": ["boolean", "array"],
        "items": { "type": "string" }
    })
}

fn static_files() -> Value {
    let non_empty = json!({ "type": "string", "minLength": 1 });

    let header = json!({
        "type": "object",
        "properties": {
            "key": { "type": "string", "pattern": HEADER_NAME.as_str() },
            "value": { "type": "string", "format": PRINTABLE_FORMAT }
        },
        "required": ["key", "value"],
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "public": { "type": "string" },
            "cleanUrls": path_toggle(),
            "rewrites": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "source": non_empty, "destination": non_empty },
                    "required": ["source", "destination"],
                    "additionalProperties": false
                }
            },
            "redirects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "source": non_empty,
                        "destination": non_empty,
                        "type": { "type": "integer", "minimum": 300, "maximum": 399 }
                    },
                    "required": ["source", "destination"],
                    "additionalProperties": false
                }
            },
            "headers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "source": non_empty,
                        "headers": { "type": "array", "items": header }
                    },
                    "required": ["source", "headers"],
                    "additionalProperties": false
                }
            },
            "directoryListing": path_toggle(),
            "unlisted": { "type": "array", "items": { "type": "string" } },
            "trailingSlash": { "type": "boolean" },
            "renderSingle": { "type": "boolean" },
            "symlinks": { "type": "boolean" }
        },
        "additionalProperties": false
    })
}
