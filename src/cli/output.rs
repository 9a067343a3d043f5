//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! validation reports and schema field tables in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::schema::{describe, FieldDescription, ReasonCode, SchemaKind, ValidationReport};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Violation row for table display.
#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Field row for table display.
#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Constraints")]
    constraints: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a validation report for display.
    #[must_use]
    pub fn format_report(&self, report: &ValidationReport, source: &str) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ReportJson { source, report }).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_report_text(report, source),
        }
    }

    /// Formats a report as text.
    fn format_report_text(report: &ValidationReport, source: &str) -> String {
        if report.is_valid() {
            return format!(
                "{} {source} is a valid {} document\n",
                "✓".green(),
                report.schema
            );
        }

        let mut output = String::new();
        let _ = writeln!(
            output,
            "{} {source} is not a valid {} document\n",
            "✗".red(),
            report.schema
        );

        let rows: Vec<ViolationRow> = report
            .violations
            .iter()
            .enumerate()
            .map(|(i, v)| ViolationRow {
                index: i + 1,
                field: v.field_path.to_string(),
                reason: Self::format_reason(v.reason_code),
                message: Self::truncate(&v.message, 80),
            })
            .collect();

        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        let _ = writeln!(
            output,
            "\n{} violation(s)",
            report.violation_count().to_string().red()
        );

        output
    }

    /// Formats the field table of a schema for display.
    #[must_use]
    pub fn format_description(&self, kind: SchemaKind) -> String {
        let rows = describe(kind.definition());
        match self.format {
            OutputFormat::Json => {
                let fields: Vec<FieldJson<'_>> = rows.iter().map(FieldJson::from).collect();
                serde_json::to_string_pretty(&DescriptionJson {
                    schema: kind.name(),
                    fields,
                })
                .unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();
                let _ = writeln!(output, "\n{} schema\n", kind.name().bold());
                let table_rows: Vec<RuleRow> = rows
                    .into_iter()
                    .map(|row| RuleRow {
                        field: row.path,
                        kind: row.kind,
                        constraints: row.constraints,
                    })
                    .collect();
                output.push_str(&Table::new(table_rows).to_string());
                output.push('\n');
                output
            }
        }
    }

    /// Formats a reason code with color.
    fn format_reason(code: ReasonCode) -> String {
        match code {
            ReasonCode::UnrecognizedProperty | ReasonCode::MissingProperty => {
                code.as_str().yellow().to_string()
            }
            ReasonCode::MissingDependency => code.as_str().magenta().to_string(),
            _ => code.as_str().red().to_string(),
        }
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{head}...")
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ReportJson<'a> {
    source: &'a str,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

#[derive(serde::Serialize)]
struct DescriptionJson<'a> {
    schema: &'static str,
    fields: Vec<FieldJson<'a>>,
}

#[derive(serde::Serialize)]
struct FieldJson<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    constraints: &'a str,
}

impl<'a> From<&'a FieldDescription> for FieldJson<'a> {
    fn from(row: &'a FieldDescription) -> Self {
        Self {
            path: &row.path,
            kind: &row.kind,
            constraints: &row.constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_report() {
        let report = SchemaKind::User.validate(&json!({ "username": null }));
        let output = OutputFormatter::new(OutputFormat::Json).format_report(&report, "user.json");
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["source"], "user.json");
        assert_eq!(parsed["schema"], "user");
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["violations"][0]["fieldPath"], "username");
        assert_eq!(parsed["violations"][0]["reasonCode"], "type-mismatch");
        assert_eq!(parsed["violations"][0]["message"], "should be string");
    }

    #[test]
    fn test_text_report_lists_violations() {
        colored::control::set_override(false);
        let report = SchemaKind::Deployment.validate(&json!({ "foo": 1 }));
        let output = OutputFormatter::new(OutputFormat::Text).format_report(&report, "now.json");

        assert!(output.contains("now.json is not a valid deployment document"));
        assert!(output.contains("unrecognized-property"));
        assert!(output.contains("should NOT have additional properties"));
    }

    #[test]
    fn test_json_description() {
        let output = OutputFormatter::new(OutputFormat::Json).format_description(SchemaKind::User);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let paths: Vec<_> = parsed["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["path"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["username", "name", "billingChecked", "avatar", "email", "platformVersion"]
        );
        assert_eq!(parsed["fields"][3]["constraints"], "length 40; pattern ^[0-9a-f]+$");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("abcdefghijkl", 8), "abcde...");
    }
}
