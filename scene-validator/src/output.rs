//! Shared output formatting for validation results.
//!
//! JSON is the machine-readable contract (2-space indentation, UTF-8).
//! The plain-text summary is for log lines and terminals.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::issue::Severity;
use crate::report::ValidationResult;

/// Serialize a `ValidationResult` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(result: &ValidationResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Format a `ValidationResult` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(result: &ValidationResult, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = to_json(result)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write a `ValidationResult` as JSON to a file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_file(result: &ValidationResult, path: &Path) -> anyhow::Result<()> {
    let json = to_json(result)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write validation results to {}", path.display()))
}

/// One-line summary, e.g. `scene "s1": invalid (2 errors, 1 warning, 0 info)`.
#[must_use]
pub fn summary_line(result: &ValidationResult) -> String {
    format!(
        "scene {}: {} ({} errors, {} warnings, {} info)",
        result.scene_id(),
        if result.valid() { "valid" } else { "invalid" },
        result.count_severity(Severity::Error),
        result.count_severity(Severity::Warning),
        result.count_severity(Severity::Info),
    )
}

/// Format a `ValidationResult` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(result: &ValidationResult, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", summary_line(result))?;

    if !result.basic_issues().is_empty() {
        writeln!(writer, "  Structure:")?;
        for issue in result.basic_issues() {
            writeln!(writer, "    {}", issue.format_human_readable())?;
        }
    }

    if !result.content_issues().is_empty() {
        writeln!(writer, "  Content:")?;
        for issue in result.content_issues() {
            writeln!(writer, "    {}", issue.format_human_readable())?;
            if let Some(suggestion) = &issue.suggestion {
                writeln!(writer, "      suggestion: {suggestion}")?;
            }
        }
    }

    Ok(())
}
