//! Validation rule sets for deployment configurations and user profiles.
//!
//! This module is the pure core of the crate:
//! - [`deployment`] and [`user`]: the two schemas, as JSON Schema documents
//! - [`patterns`]: the shared pattern library those documents embed
//! - [`engine`]: compilation with `jsonschema` and error translation
//! - [`definition`]: field tables for the `describe` command
//!
//! Nothing here performs I/O, and every schema is `Send + Sync`.

pub mod definition;
pub mod deployment;
pub mod engine;
pub mod patterns;
pub mod user;
mod violation;

pub use definition::{describe, FieldDescription};
pub use deployment::DeploymentConfigSchema;
pub use user::UserSchema;
pub use violation::{FieldPath, ReasonCode, ValidationReport, Violation};

use jsonschema::Validator;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::error::{DocumentError, Result};

/// A document schema: a JSON Schema definition plus optional cross-field invariants.
pub trait Schema: Send + Sync {
    /// Typed view of a document that passed validation.
    type Document: DeserializeOwned;

    /// Short schema name used in reports.
    fn name(&self) -> &'static str;

    /// The JSON Schema document describing the whole document.
    fn definition(&self) -> &Value;

    /// The compiled form of [`Schema::definition`].
    fn validator(&self) -> &Validator;

    /// Checks constraints spanning several fields.
    ///
    /// Runs after the JSON Schema pass, on every document, whatever it reported.
    fn invariants(&self, _document: &Value, _violations: &mut Vec<Violation>) {}

    /// Validates a document.
    fn validate(&self, document: &Value) -> ValidationReport {
        let mut violations = engine::evaluate(self.validator(), self.definition(), document);
        self.invariants(document, &mut violations);

        let report = ValidationReport::new(self.name(), violations);
        debug!(
            schema = report.schema,
            valid = report.valid,
            violations = report.violation_count(),
            "Validated document"
        );
        report
    }

    /// Validates a document and, if it passes, deserializes its typed view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::Validation`] if the document does not
    /// pass, or a parse error if the typed view cannot be built.
    fn parse(&self, document: &Value) -> Result<Self::Document> {
        self.validate(document).into_result()?;
        <Self::Document as Deserialize>::deserialize(document)
            .map_err(|e| DocumentError::parse(format!("typed view: {e}"), None).into())
    }
}

/// Selects one of the built-in schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaKind {
    /// The deployment configuration schema.
    Deployment,
    /// The user profile schema.
    User,
}

impl SchemaKind {
    /// Returns the schema name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deployment => deployment::NAME,
            Self::User => user::NAME,
        }
    }

    /// Validates a document against the selected schema.
    #[must_use]
    pub fn validate(self, document: &Value) -> ValidationReport {
        match self {
            Self::Deployment => DeploymentConfigSchema.validate(document),
            Self::User => UserSchema.validate(document),
        }
    }

    /// Returns the JSON Schema document of the selected schema.
    #[must_use]
    pub fn definition(self) -> &'static Value {
        match self {
            Self::Deployment => deployment::definition(),
            Self::User => user::definition(),
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
