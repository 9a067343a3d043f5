//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schema::SchemaKind;

/// deploy-schemas - Validate deployment configurations and user profiles.
#[derive(Parser, Debug)]
#[command(name = "deploy-schemas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text", env = "DEPLOY_SCHEMAS_OUTPUT")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a JSON or YAML document.
    Validate {
        /// Document to validate.
        file: PathBuf,

        /// Schema to validate against (inferred from the file name if omitted).
        #[arg(short, long, env = "DEPLOY_SCHEMAS_SCHEMA")]
        schema: Option<SchemaKind>,
    },

    /// Print the field table of a schema.
    Describe {
        /// Schema to describe.
        schema: SchemaKind,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from(["deploy-schemas", "validate", "now.json", "--schema", "user"]);
        match cli.command {
            Commands::Validate { file, schema } => {
                assert_eq!(file, PathBuf::from("now.json"));
                assert_eq!(schema, Some(SchemaKind::User));
            }
            Commands::Describe { .. } => panic!("expected validate"),
        }
    }

    #[test]
    fn test_parse_describe_json() {
        let cli = Cli::parse_from(["deploy-schemas", "--output", "json", "describe", "deployment"]);
        assert!(matches!(cli.output, OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Describe {
                schema: SchemaKind::Deployment
            }
        ));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
