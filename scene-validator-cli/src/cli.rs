use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use scene_validator::output::{summary_line, write_human, write_json, write_json_file};
use scene_validator::{
    Credential, GEMINI_API_KEY_ENV, GeminiConfig, SceneValidator, ValidationResult,
};
use tracing::info;

/// Validate scene structure and continuity.
#[derive(Parser, Debug)]
#[command(name = "scene-validator", version, about)]
pub struct Cli {
    /// Path to JSON file containing scene data
    pub filepath: PathBuf,

    /// Gemini API key (can also use `GEMINI_API_KEY` env var)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Output file for validation results (JSON format)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Verbosity level (-v for debug logs and a readable report on stderr, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Process exit status for a result: `0` iff the scene is valid.
#[must_use]
pub fn exit_code(result: &ValidationResult) -> i32 {
    i32::from(!result.valid())
}

/// Run the CLI against the real environment and standard streams.
///
/// # Errors
///
/// Returns an error if the results cannot be written.
pub fn run(cli: &Cli) -> Result<ValidationResult> {
    let env_key = std::env::var(GEMINI_API_KEY_ENV).ok();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_with(cli, env_key, &mut stdout.lock(), &mut stderr.lock())
}

/// Build the validator for an invocation.
///
/// The credential comes from `--api-key`, falling back to `env_key`; an
/// empty value on either side counts as absent.
#[must_use]
pub fn build_validator(cli: &Cli, env_key: Option<String>) -> SceneValidator {
    let credential = Credential::resolve(cli.api_key.clone(), env_key);
    SceneValidator::from_credential(credential, &GeminiConfig::default())
}

/// Validate `cli.filepath` and emit the result.
///
/// The validator comes from [`build_validator`]. With
/// `--output` the JSON goes to that file and a confirmation line to `stdout`;
/// otherwise the JSON goes to `stdout`.
///
/// # Errors
///
/// Returns an error if the results cannot be written.
pub fn run_with(
    cli: &Cli,
    env_key: Option<String>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<ValidationResult> {
    let validator = build_validator(cli, env_key);
    info!(service = validator.service_name(), "Content analysis service selected");

    let result = validator.validate_file(&cli.filepath);
    info!(path = %cli.filepath.display(), "{}", summary_line(&result));

    if cli.verbose > 0 {
        write_human(&result, stderr)?;
    }

    if let Some(output) = &cli.output {
        write_json_file(&result, output)?;
        writeln!(stdout, "Validation results written to {}", output.display())?;
    } else {
        write_json(&result, stdout)?;
    }

    Ok(result)
}
