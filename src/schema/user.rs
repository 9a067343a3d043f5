//! User profile schema.

use jsonschema::Validator;
use serde_json::{json, Value};
use std::sync::LazyLock;

use super::engine::{self, EMAIL_FORMAT};
use super::patterns::{HEX_DIGEST, HEX_DIGEST_LEN, USERNAME};
use super::Schema;
use crate::document::UserProfile;

/// Schema name used in reports.
pub const NAME: &str = "user";

/// Longest accepted username.
pub const USERNAME_MAX_LEN: usize = 48;

/// Longest accepted display name.
pub const NAME_MAX_LEN: usize = 32;

/// Longest accepted email address.
pub const EMAIL_MAX_LEN: usize = 256;

/// Platform versions a profile may be pinned to, inclusive.
pub const PLATFORM_VERSIONS: (u8, u8) = (1, 2);

static DEFINITION: LazyLock<Value> = LazyLock::new(build_definition);
static VALIDATOR: LazyLock<Validator> = LazyLock::new(|| engine::compile(&DEFINITION));

/// Returns the user profile schema as a JSON Schema (draft-07) document.
#[must_use]
pub fn definition() -> &'static Value {
    &DEFINITION
}

/// Validator for user profile documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSchema;

impl Schema for UserSchema {
    type Document = UserProfile;

    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> &Value {
        definition()
    }

    fn validator(&self) -> &Validator {
        &VALIDATOR
    }
}

fn build_definition() -> Value {
    let (min_version, max_version) = PLATFORM_VERSIONS;
    json!({
        "type": "object",
        "properties": {
            "username": {
                "type": "string",
                "minLength": 1,
                "maxLength": USERNAME_MAX_LEN,
                "pattern": USERNAME.as_str()
            },
            "name": { "type": "string", "minLength": 1, "maxLength": NAME_MAX_LEN },
            "billingChecked": { "type": "boolean" },
            "avatar": {
                "type": "string",
                "minLength": HEX_DIGEST_LEN,
                "maxLength": HEX_DIGEST_LEN,
                "pattern": HEX_DIGEST.as_str()
            },
            "email": { "type": "string", "maxLength": EMAIL_MAX_LEN, "format": EMAIL_FORMAT },
            "platformVersion": {
                "type": ["null", "integer"],
                "minimum": min_version,
                "maximum": max_version
            }
        },
        "additionalProperties": false
    })
}
