//! Gemini `generateContent` client for content analysis.
//!
//! The call is blocking with a per-request timeout. Retries are not built in;
//! every failure is reported as a [`ServiceError`] and ends up as a single
//! `api_error` issue.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::ContentAnalysisService;
use crate::config::{Credential, GeminiConfig};
use crate::error::ServiceError;
use crate::issue::{Issue, IssueKind, Severity};
use crate::record::SceneRecord;

/// Longest response body excerpt kept in HTTP errors.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// An issue as the model reports it.
///
/// The prompt asks for `description`; `message` is accepted too and loses
/// to `description` when both are present.
#[derive(Debug, Deserialize)]
struct ReportedIssue {
    #[serde(rename = "type")]
    kind: IssueKind,
    #[serde(default)]
    field: Option<String>,
    severity: Severity,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    suggestion: Option<String>,
}

impl TryFrom<ReportedIssue> for Issue {
    type Error = ServiceError;

    fn try_from(reported: ReportedIssue) -> Result<Self, Self::Error> {
        let message = reported.description.or(reported.message).ok_or_else(|| {
            ServiceError::MalformedResponse(format!(
                "issue of type {} has no description",
                reported.kind
            ))
        })?;

        let mut issue = Issue::new(reported.kind, reported.severity, message);
        issue.field = reported.field;
        issue.suggestion = reported.suggestion;
        Ok(issue)
    }
}

/// Content-analysis service backed by a Gemini model.
#[derive(Debug)]
pub struct GeminiService {
    client: Client,
    credential: Credential,
    endpoint: String,
    config: GeminiConfig,
}

impl GeminiService {
    /// Build the HTTP client for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ClientCreation`] if the HTTP client cannot be
    /// initialised.
    pub fn new(credential: Credential, config: GeminiConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::ClientCreation(e.to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        debug!(model = %config.model, endpoint = %endpoint, "Created Gemini client");

        Ok(Self {
            client,
            credential,
            endpoint,
            config,
        })
    }

    fn send(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.credential.expose())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout {
                        elapsed_ms: self.config.timeout.as_millis(),
                    }
                } else {
                    ServiceError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(ServiceError::Http {
                status: status.as_u16(),
                message: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .map_err(|e| ServiceError::MalformedResponse(format!("invalid envelope: {e}")))?;

        let text: String = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ServiceError::MalformedResponse(
                "response contained no candidate text".to_owned(),
            ));
        }
        Ok(text)
    }
}

impl ContentAnalysisService for GeminiService {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    fn analyze(&self, scene: &SceneRecord) -> Result<Vec<Issue>, ServiceError> {
        let prompt = analysis_prompt(scene);
        let text = self.send(&prompt)?;
        debug!(chars = text.len(), "Received content analysis");
        parse_issues(&text)
    }
}

/// Build the analysis prompt for a scene.
#[must_use]
pub fn analysis_prompt(scene: &SceneRecord) -> String {
    let scene_json = Value::Object(scene.as_map().clone());
    format!(
        "Analyze this scene for continuity issues, logical problems, and inconsistencies.\n\
         Scene data: {scene_json:#}\n\
         \n\
         Identify specific issues related to:\n\
         1. Character continuity (appearance, location, etc.)\n\
         2. Timeline inconsistencies\n\
         3. Logical problems in the action sequence\n\
         4. Spatial/location inconsistencies\n\
         \n\
         Format your response as a JSON list of issues, each with 'type', 'description', \
         'severity' (info, warning, error), and 'suggestion' fields. \
         Respond with an empty list if there are no issues.\n"
    )
}

/// Parse the model's answer into issues.
///
/// Accepts a bare JSON list or an object with an `issues` list, optionally
/// wrapped in a Markdown code fence.
///
/// # Errors
///
/// Returns [`ServiceError::MalformedResponse`] if the text is not JSON or
/// any element is not a valid issue.
pub fn parse_issues(text: &str) -> Result<Vec<Issue>, ServiceError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| ServiceError::MalformedResponse(format!("not JSON: {e}")))?;

    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut map) => match map.remove("issues") {
            Some(list @ Value::Array(_)) => list,
            _ => {
                return Err(ServiceError::MalformedResponse(
                    "expected a list of issues".to_owned(),
                ));
            }
        },
        _ => {
            return Err(ServiceError::MalformedResponse(
                "expected a list of issues".to_owned(),
            ));
        }
    };

    let reported: Vec<ReportedIssue> = serde_json::from_value(list)
        .map_err(|e| ServiceError::MalformedResponse(format!("invalid issue: {e}")))?;
    reported.into_iter().map(Issue::try_from).collect()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
