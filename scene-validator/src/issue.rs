//! Issue types reported by the structural and content checkers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How serious a reported issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note; the scene is still usable.
    #[serde(alias = "Info", alias = "INFO")]
    Info,
    /// Something looks off or a check could not run.
    #[serde(alias = "Warning", alias = "WARNING")]
    Warning,
    /// The scene is invalid and must be fixed.
    #[serde(alias = "Error", alias = "ERROR")]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Category tag of an issue.
///
/// The known tags form the observable contract of the validator. Content
/// analysis may report any other category, which is kept verbatim in
/// [`IssueKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IssueKind {
    /// A required scene field is absent.
    MissingField,
    /// A scene field has the wrong JSON type.
    InvalidFormat,
    /// Content analysis was skipped because no credential was configured.
    ApiUnavailable,
    /// The content-analysis service failed or answered with garbage.
    ApiError,
    /// The scene file is not valid JSON.
    InvalidJson,
    /// The scene file does not exist.
    FileNotFound,
    /// Any other I/O failure while reading the scene file.
    IoError,
    /// A category reported by the content-analysis service.
    Other(String),
}

impl IssueKind {
    /// The wire tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidFormat => "invalid_format",
            Self::ApiUnavailable => "api_unavailable",
            Self::ApiError => "api_error",
            Self::InvalidJson => "invalid_json",
            Self::FileNotFound => "file_not_found",
            Self::IoError => "io_error",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for IssueKind {
    fn from(tag: &str) -> Self {
        match tag {
            "missing_field" => Self::MissingField,
            "invalid_format" => Self::InvalidFormat,
            "api_unavailable" => Self::ApiUnavailable,
            "api_error" => Self::ApiError,
            "invalid_json" => Self::InvalidJson,
            "file_not_found" => Self::FileNotFound,
            "io_error" => Self::IoError,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IssueKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IssueKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}

/// A single problem found while validating a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Issue {
    /// Category tag (e.g. `missing_field`).
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Scene field the issue refers to, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// How serious the issue is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Suggested fix, as produced by content analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    /// Create an issue with no field and no suggestion.
    #[must_use]
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            severity,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach the scene field this issue refers to.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach a suggested fix.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `missing_field` error for a required scene field.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            IssueKind::MissingField,
            Severity::Error,
            format!("Required field '{field}' is missing"),
        )
        .with_field(field)
    }

    /// `invalid_format` error for a field that must be a list.
    #[must_use]
    pub fn not_a_list(field: &str) -> Self {
        Self::new(
            IssueKind::InvalidFormat,
            Severity::Error,
            format!("'{field}' must be a list"),
        )
        .with_field(field)
    }

    /// Format the issue for human-readable output.
    ///
    /// `[{severity}] {type} ({field}): {message}`, the field part omitted
    /// when absent.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.field {
            Some(field) => format!(
                "[{}] {} ({field}): {}",
                self.severity, self.kind, self.message
            ),
            None => format!("[{}] {}: {}", self.severity, self.kind, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_serializes_contract_keys() {
        let issue = Issue::missing_field("location");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "missing_field",
                "field": "location",
                "severity": "error",
                "message": "Required field 'location' is missing"
            })
        );
    }

    #[test]
    fn test_optional_keys_are_omitted() {
        let issue = Issue::new(IssueKind::ApiUnavailable, Severity::Warning, "skipped");
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("field").is_none());
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["type"], "api_unavailable");
        assert_eq!(json["severity"], "warning");
    }

    #[test]
    fn test_unknown_tag_is_kept_verbatim() {
        let kind: IssueKind = serde_json::from_str(r#""timeline_inconsistency""#).unwrap();
        assert_eq!(kind, IssueKind::Other("timeline_inconsistency".to_owned()));
        assert_eq!(
            serde_json::to_value(&kind).unwrap(),
            "timeline_inconsistency"
        );
    }

    #[test]
    fn test_severity_accepts_capitalised_spellings() {
        for raw in [r#""warning""#, r#""Warning""#, r#""WARNING""#] {
            let severity: Severity = serde_json::from_str(raw).unwrap();
            assert_eq!(severity, Severity::Warning);
        }
    }

    #[test]
    fn test_known_tags_round_trip_through_from() {
        for tag in [
            "missing_field",
            "invalid_format",
            "api_unavailable",
            "api_error",
            "invalid_json",
            "file_not_found",
            "io_error",
        ] {
            let kind = IssueKind::from(tag);
            assert!(!matches!(kind, IssueKind::Other(_)), "{tag} should be known");
            assert_eq!(kind.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let result: Result<Severity, _> = serde_json::from_str(r#""fatal""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_human_readable() {
        assert_eq!(
            Issue::not_a_list("actions").format_human_readable(),
            "[error] invalid_format (actions): 'actions' must be a list"
        );
        assert_eq!(
            Issue::new(IssueKind::ApiError, Severity::Error, "boom").format_human_readable(),
            "[error] api_error: boom"
        );
    }
}
