//! # scene-validator
//!
//! Structural and continuity validation for narrative scene descriptions.
//!
//! A scene is a JSON object with `id`, `location`, `time`, `characters` and
//! `actions`. Validation has two independent halves:
//!
//! - **structural checks** ([`check_structure`]): required fields present,
//!   `characters` and `actions` are lists;
//! - **content analysis** ([`check_content`]): continuity, timeline,
//!   action-logic and spatial problems, delegated to a
//!   [`ContentAnalysisService`] (Gemini when a credential is configured).
//!
//! Every problem, including unreadable files and service failures, is
//! reported as an [`Issue`] inside a [`ValidationResult`]; nothing here
//! panics or returns an error for bad input.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use scene_validator::{Credential, GeminiConfig, SceneValidator};
//!
//! let credential = Credential::resolve(None, std::env::var("GEMINI_API_KEY").ok());
//! let validator = SceneValidator::from_credential(credential, &GeminiConfig::default());
//!
//! let result = validator.validate_file(Path::new("scenes/opening.json"));
//! println!("Scene: {}", result.scene_id());
//! println!("Structural issues: {}", result.basic_issues().len());
//! println!("Content issues: {}", result.content_issues().len());
//! println!("Valid: {}", result.valid());
//! ```

mod config;
pub mod content;
mod error;
mod issue;
mod loader;
pub mod output;
mod record;
mod report;
mod structure;
mod validator;

use std::path::Path;

pub use config::{
    Credential, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GEMINI_API_KEY_ENV, GeminiConfig,
    LoaderConfig,
};
pub use content::{ContentAnalysisService, GeminiService, UnavailableService, check_content};
pub use error::ServiceError;
pub use issue::{Issue, IssueKind, Severity};
pub use loader::load_scene;
pub use record::{LIST_FIELDS, REQUIRED_FIELDS, SceneRecord, UNKNOWN_SCENE_ID};
pub use report::ValidationResult;
pub use structure::check_structure;
pub use validator::SceneValidator;

/// Validate a scene file with default Gemini and loader settings.
///
/// Missing files and invalid JSON come back as a result carrying a single
/// `file_not_found` / `invalid_json` issue and `scene_id` `"unknown"`.
#[must_use]
pub fn validate_from_file(path: &Path, credential: Option<Credential>) -> ValidationResult {
    SceneValidator::from_credential(credential, &GeminiConfig::default()).validate_file(path)
}
