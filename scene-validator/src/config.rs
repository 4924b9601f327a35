//! Configuration types for scene validation.
//!
//! The credential is resolved once by the caller (the CLI resolves it from
//! `--api-key` or the environment) and handed to the validator explicitly.
//! Nothing in this crate reads environment variables.

use std::fmt;
use std::time::Duration;

/// Environment variable the CLI falls back to when no key is passed.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model used for content analysis.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// API key for the content-analysis service.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key. Returns `None` for an empty key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    /// Pick the explicit key if usable, otherwise the fallback.
    ///
    /// Empty strings count as absent on both sides.
    #[must_use]
    pub fn resolve(explicit: Option<String>, fallback: Option<String>) -> Option<Self> {
        explicit
            .and_then(Self::new)
            .or_else(|| fallback.and_then(Self::new))
    }

    /// The raw key, for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Settings for the Gemini content-analysis client.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GeminiConfig {
    /// Base URL of the REST API, without trailing slash.
    pub base_url: String,
    /// Model name (e.g. `gemini-2.0-flash`).
    pub model: String,
    /// Per-request timeout (default: 30 s).
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for reading scene files.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct LoaderConfig {
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10_485_760,
        }
    }
}
