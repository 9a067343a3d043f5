//! deploy-schemas CLI entrypoint.
//!
//! This is the main entrypoint for the deploy-schemas command-line tool.

use std::path::Path;
use std::process::ExitCode;

use deploy_schemas::cli::{Cli, Commands, OutputFormatter};
use deploy_schemas::error::Result;
use deploy_schemas::loader::{infer_schema, DocumentLoader};
use deploy_schemas::schema::SchemaKind;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // Environment defaults for the flags below may come from a local .env file.
    if let Err(e) = DocumentLoader::new().load_dotenv() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Log level used when `RUST_LOG` is unset.
const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Runs the selected command; returns whether the document was valid.
fn run(cli: Cli) -> Result<bool> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Validate { file, schema } => cmd_validate(&file, schema, &formatter),
        Commands::Describe { schema } => {
            println!("{}", formatter.format_description(schema));
            Ok(true)
        }
    }
}

/// Validate a document.
fn cmd_validate(
    file: &Path,
    schema: Option<SchemaKind>,
    formatter: &OutputFormatter,
) -> Result<bool> {
    let kind = schema.unwrap_or_else(|| {
        let inferred = infer_schema(file);
        debug!("No schema given, inferred '{inferred}' from file name");
        inferred
    });
    info!("Validating {} against the {kind} schema", file.display());

    let document = DocumentLoader::new().load_file(file)?;
    let report = kind.validate(&document);

    println!("{}", formatter.format_report(&report, &file.display().to_string()));
    Ok(report.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_level(false), "info");
        assert_eq!(default_level(true), "debug");
    }
}
