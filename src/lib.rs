// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Deploy Schemas
//!
//! Validation rule sets for the two documents a deployment platform accepts
//! from its users: the **deployment configuration** and the **user profile**.
//!
//! ## Overview
//!
//! Each schema is a JSON Schema document compiled once with `jsonschema`,
//! plus cross-field invariants checked afterwards. Validating a document
//! never fails: it yields a [`ValidationReport`] listing every violated rule,
//! each with a field path, a reason code and a message.
//!
//! ## Modules
//!
//! - [`schema`]: schema definitions, the pattern library and error translation
//! - [`document`]: typed views of documents that passed validation
//! - [`loader`]: JSON/YAML document loading
//! - [`error`]: error types for everything around validation
//! - [`cli`]: command-line interface
//!
//! ## Example
//!
//! ```
//! use deploy_schemas::{DeploymentConfigSchema, ReasonCode, Schema};
//! use serde_json::json;
//!
//! let report = DeploymentConfigSchema.validate(&json!({ "slot": "c.125-m512" }));
//! assert!(!report.is_valid());
//! assert_eq!(report.violations[0].reason_code, ReasonCode::MissingDependency);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod document;
pub mod error;
pub mod loader;
pub mod schema;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use document::{DeploymentConfig, SlotKey, UserProfile};
pub use error::{DocumentError, Result, SchemaError};
pub use loader::{DocumentFormat, DocumentLoader};
pub use schema::{
    DeploymentConfigSchema, FieldPath, ReasonCode, Schema, SchemaKind, UserSchema,
    ValidationReport, Violation,
};
