//! Scene file loading.
//!
//! Every failure is turned into an [`Issue`]; callers wrap it into a
//! [`ValidationResult`](crate::ValidationResult) that ends validation early.
//! `file_not_found` and `invalid_json` are distinguished; every other I/O
//! problem (permissions, directories, oversized or non-UTF-8 files) is an
//! `io_error`.

use std::io::{ErrorKind, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::LoaderConfig;
use crate::issue::{Issue, IssueKind, Severity};
use crate::record::SceneRecord;

/// Read and parse a scene file.
///
/// # Errors
///
/// Returns the issue describing why the file could not be loaded.
pub fn load_scene(path: &Path, config: &LoaderConfig) -> Result<SceneRecord, Issue> {
    let content = read_file_bounded(path, config.max_file_size)?;

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Scene file is not valid JSON");
        Issue::new(
            IssueKind::InvalidJson,
            Severity::Error,
            "File contains invalid JSON",
        )
    })?;

    debug!(path = %path.display(), bytes = content.len(), "Loaded scene file");
    Ok(SceneRecord::from_value(value))
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so an oversized file is detected
/// without loading it whole.
fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, Issue> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Issue::new(
                IssueKind::FileNotFound,
                Severity::Error,
                format!("File not found: {}", path.display()),
            )
        } else {
            io_error(format!("Failed to open file {}: {e}", path.display()))
        }
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| io_error(format!("Failed to read file {}: {e}", path.display())))?;

    if buffer.len() as u64 > max_file_size {
        return Err(io_error(format!(
            "File exceeds maximum size of {max_file_size} bytes"
        )));
    }

    String::from_utf8(buffer).map_err(|_| io_error("File is not valid UTF-8".to_owned()))
}

fn io_error(message: String) -> Issue {
    Issue::new(IssueKind::IoError, Severity::Error, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");

        let issue = load_scene(&path, &LoaderConfig::default()).unwrap_err();
        assert_eq!(issue.kind, IssueKind::FileNotFound);
        assert!(issue.message.contains("absent.json"), "got: {}", issue.message);
    }

    #[test]
    fn test_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let issue = load_scene(&path, &LoaderConfig::default()).unwrap_err();
        assert_eq!(issue.kind, IssueKind::InvalidJson);
        assert_eq!(issue.message, "File contains invalid JSON");
    }

    #[test]
    fn test_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let issue = load_scene(tmp.path(), &LoaderConfig::default()).unwrap_err();
        assert_eq!(issue.kind, IssueKind::IoError);
    }

    #[test]
    fn test_oversized_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        fs::write(&path, r#"{"id": "a-rather-long-identifier"}"#).unwrap();

        let mut config = LoaderConfig::default();
        config.max_file_size = 8;
        let issue = load_scene(&path, &config).unwrap_err();
        assert_eq!(issue.kind, IssueKind::IoError);
        assert!(issue.message.contains("maximum size"));
    }

    #[test]
    fn test_non_utf8_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("latin1.json");
        fs::write(&path, [b'{', b'"', 0xE9, b'"', b'}']).unwrap();

        let issue = load_scene(&path, &LoaderConfig::default()).unwrap_err();
        assert_eq!(issue.kind, IssueKind::IoError);
    }

    #[test]
    fn test_loads_object() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scene.json");
        fs::write(&path, r#"{"id": "s1", "extra": {"mood": "tense"}}"#).unwrap();

        let record = load_scene(&path, &LoaderConfig::default()).unwrap();
        assert!(record.contains("extra"));
        assert_eq!(record.scene_id(), serde_json::json!("s1"));
    }
}
