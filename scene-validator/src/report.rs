//! Validation result type.

use serde::Serialize;
use serde_json::Value;

use crate::issue::{Issue, Severity};
use crate::record::UNKNOWN_SCENE_ID;

/// Outcome of validating one scene.
///
/// `valid` is true exactly when both issue lists are empty. A skipped content
/// check (`api_unavailable` warning) therefore makes the scene invalid too.
/// Fields are private so that the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    basic_issues: Vec<Issue>,
    content_issues: Vec<Issue>,
    scene_id: Value,
}

impl ValidationResult {
    /// Assemble a result, deriving `valid` from the issue lists.
    #[must_use]
    pub fn new(basic_issues: Vec<Issue>, content_issues: Vec<Issue>, scene_id: Value) -> Self {
        Self {
            valid: basic_issues.is_empty() && content_issues.is_empty(),
            basic_issues,
            content_issues,
            scene_id,
        }
    }

    /// Result for a scene that could not even be loaded.
    #[must_use]
    pub fn load_failure(issue: Issue) -> Self {
        Self::new(
            vec![issue],
            Vec::new(),
            Value::String(UNKNOWN_SCENE_ID.to_owned()),
        )
    }

    /// Whether the scene passed every check.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Structural and loader issues.
    #[must_use]
    pub fn basic_issues(&self) -> &[Issue] {
        &self.basic_issues
    }

    /// Issues reported by content analysis.
    #[must_use]
    pub fn content_issues(&self) -> &[Issue] {
        &self.content_issues
    }

    /// The scene's `id`, or `"unknown"`.
    #[must_use]
    pub fn scene_id(&self) -> &Value {
        &self.scene_id
    }

    /// All issues, basic first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.basic_issues.iter().chain(&self.content_issues)
    }

    /// Number of issues with the given severity.
    #[must_use]
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues().filter(|i| i.severity == severity).count()
    }
}
