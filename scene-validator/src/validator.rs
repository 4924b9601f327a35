//! The scene validator: structural checks plus content analysis.

use std::fmt;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::config::{Credential, GeminiConfig, LoaderConfig};
use crate::content::{
    ContentAnalysisService, GeminiService, MisconfiguredService, UnavailableService, check_content,
};
use crate::loader::load_scene;
use crate::record::SceneRecord;
use crate::report::ValidationResult;
use crate::structure::check_structure;

/// Validates scenes against the structural rules and a content-analysis
/// service.
///
/// Holds no per-call state, so one instance can validate any number of
/// scenes, from several threads if needed.
pub struct SceneValidator {
    service: Box<dyn ContentAnalysisService>,
    loader: LoaderConfig,
}

impl SceneValidator {
    /// Validator backed by the given content-analysis service.
    #[must_use]
    pub fn new(service: Box<dyn ContentAnalysisService>) -> Self {
        Self {
            service,
            loader: LoaderConfig::default(),
        }
    }

    /// Validator for an optional credential: Gemini when a key is present,
    /// otherwise content analysis is reported as unavailable.
    #[must_use]
    pub fn from_credential(credential: Option<Credential>, gemini: &GeminiConfig) -> Self {
        let service: Box<dyn ContentAnalysisService> = match credential {
            None => {
                warn!("No Gemini API key provided. Limited functionality available.");
                Box::new(UnavailableService)
            }
            Some(credential) => match GeminiService::new(credential, gemini.clone()) {
                Ok(service) => Box::new(service),
                Err(e) => {
                    error!(error = %e, "Failed to set up Gemini content analysis");
                    Box::new(MisconfiguredService::new(&e))
                }
            },
        };
        Self::new(service)
    }

    /// Replace the file loading settings.
    #[must_use]
    pub fn with_loader_config(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }

    /// Name of the content-analysis service in use.
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Validate a scene.
    ///
    /// Structural and content checks run independently; neither can keep the
    /// other from running.
    #[must_use]
    pub fn validate_scene(&self, scene: &SceneRecord) -> ValidationResult {
        let basic_issues = check_structure(scene);
        let content_issues = check_content(scene, self.service.as_ref());
        let result = ValidationResult::new(basic_issues, content_issues, scene.scene_id());

        debug!(
            scene_id = %result.scene_id(),
            valid = result.valid(),
            basic = result.basic_issues().len(),
            content = result.content_issues().len(),
            "Validated scene"
        );
        result
    }

    /// Load a scene file and validate it.
    ///
    /// Load failures produce a result with a single basic issue, no content
    /// issues and `scene_id` `"unknown"`; content analysis is not attempted.
    #[must_use]
    pub fn validate_file(&self, path: &Path) -> ValidationResult {
        match load_scene(path, &self.loader) {
            Ok(scene) => self.validate_scene(&scene),
            Err(issue) => {
                debug!(path = %path.display(), kind = %issue.kind, "Scene file could not be loaded");
                ValidationResult::load_failure(issue)
            }
        }
    }
}

impl fmt::Debug for SceneValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneValidator")
            .field("service", &self.service.name())
            .field("loader", &self.loader)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::issue::{Issue, IssueKind, Severity};
    use serde_json::json;

    struct FailingService;

    impl ContentAnalysisService for FailingService {
        fn name(&self) -> &str {
            "failing"
        }

        fn analyze(&self, _scene: &SceneRecord) -> Result<Vec<Issue>, ServiceError> {
            Err(ServiceError::Request("connection refused".to_owned()))
        }
    }

    fn unavailable() -> SceneValidator {
        SceneValidator::from_credential(None, &GeminiConfig::default())
    }

    #[test]
    fn test_well_formed_without_credential_is_invalid() {
        let scene = SceneRecord::from_value(json!({
            "id": "s1", "location": "loc", "time": "t", "characters": [], "actions": []
        }));
        let result = unavailable().validate_scene(&scene);

        assert!(result.basic_issues().is_empty());
        assert_eq!(result.content_issues().len(), 1);
        assert_eq!(result.content_issues()[0].kind, IssueKind::ApiUnavailable);
        assert!(!result.valid());
        assert_eq!(result.scene_id(), &json!("s1"));
    }

    #[test]
    fn test_content_failure_does_not_hide_structural_issues() {
        let validator = SceneValidator::new(Box::new(FailingService));
        let result = validator.validate_scene(&SceneRecord::from_value(json!({"id": 3})));

        assert_eq!(result.basic_issues().len(), 4);
        assert_eq!(result.content_issues().len(), 1);
        assert_eq!(result.content_issues()[0].kind, IssueKind::ApiError);
        assert_eq!(result.content_issues()[0].severity, Severity::Error);
        assert_eq!(result.scene_id(), &json!(3));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = unavailable();
        let scene = SceneRecord::from_value(json!({"id": "s2", "characters": "nobody"}));
        assert_eq!(validator.validate_scene(&scene), validator.validate_scene(&scene));
    }

    #[test]
    fn test_credential_selects_gemini() {
        let credential = Credential::new("key");
        let validator = SceneValidator::from_credential(credential, &GeminiConfig::default());
        assert_eq!(validator.service_name(), "gemini");
        assert_eq!(unavailable().service_name(), "unavailable");
    }

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneValidator>();
    }
}
