//! CLI module for the schema validation tool.
//!
//! This module provides the command-line interface for validating
//! documents and inspecting schema field tables.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
