//! Content analysis: continuity, timeline, action-logic and spatial checks
//! delegated to an external service.
//!
//! The validator only sees [`ContentAnalysisService`]. Implementations:
//! - [`UnavailableService`] when no credential is configured;
//! - [`GeminiService`] which asks a Gemini model over HTTP;
//! - [`MisconfiguredService`] when the Gemini client could not be built.

mod gemini;

pub use gemini::{GeminiService, analysis_prompt, parse_issues};

use tracing::{debug, error};

use crate::error::ServiceError;
use crate::issue::{Issue, IssueKind, Severity};
use crate::record::SceneRecord;

/// Message of the `api_unavailable` warning.
pub const API_UNAVAILABLE_MESSAGE: &str =
    "Content validation skipped: Gemini API key not provided";

/// Message of the `api_error` issue.
pub const API_ERROR_MESSAGE: &str = "Failed to process Gemini API response";

/// Capability to analyse a scene for content-level problems.
pub trait ContentAnalysisService: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Analyse one scene.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingCredential`] when the service is not
    /// configured, or another variant when the call fails or the response
    /// cannot be understood.
    fn analyze(&self, scene: &SceneRecord) -> Result<Vec<Issue>, ServiceError>;
}

/// Stand-in used when no credential is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableService;

impl ContentAnalysisService for UnavailableService {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn analyze(&self, _scene: &SceneRecord) -> Result<Vec<Issue>, ServiceError> {
        Err(ServiceError::MissingCredential)
    }
}

/// Stand-in used when a credential was given but the client could not be
/// set up. Every call fails with the setup error.
#[derive(Debug, Clone)]
pub struct MisconfiguredService {
    reason: String,
}

impl MisconfiguredService {
    /// Remember why the real service could not be created.
    #[must_use]
    pub fn new(err: &ServiceError) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

impl ContentAnalysisService for MisconfiguredService {
    fn name(&self) -> &str {
        "misconfigured"
    }

    fn analyze(&self, _scene: &SceneRecord) -> Result<Vec<Issue>, ServiceError> {
        Err(ServiceError::ClientCreation(self.reason.clone()))
    }
}

/// Run content analysis and fold its outcome into a list of issues.
///
/// A missing credential becomes a single `api_unavailable` warning; any other
/// failure becomes a single `api_error`.
#[must_use]
pub fn check_content(scene: &SceneRecord, service: &dyn ContentAnalysisService) -> Vec<Issue> {
    match service.analyze(scene) {
        Ok(issues) => {
            debug!(
                service = service.name(),
                issues = issues.len(),
                "Content analysis finished"
            );
            issues
        }
        Err(err) if err.is_unavailable() => vec![Issue::new(
            IssueKind::ApiUnavailable,
            Severity::Warning,
            API_UNAVAILABLE_MESSAGE,
        )],
        Err(err) => {
            error!(service = service.name(), error = %err, "Content analysis failed");
            vec![Issue::new(
                IssueKind::ApiError,
                Severity::Error,
                API_ERROR_MESSAGE,
            )]
        }
    }
}
