//! Error types for content analysis.

use thiserror::Error;

/// Failure of a content-analysis service call.
///
/// These never escape validation: the content checker turns every variant
/// into an issue in the validation result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// No credential is configured, so the service cannot be reached.
    #[error("content-analysis credential not provided")]
    MissingCredential,

    /// The HTTP client could not be built.
    #[error("failed to create content-analysis client: {0}")]
    ClientCreation(String),

    /// The request did not complete within the configured timeout.
    #[error("content-analysis request timed out after {elapsed_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        elapsed_ms: u128,
    },

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("content-analysis request failed: {0}")]
    Request(String),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from content-analysis service: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// The service answered, but not with a JSON list of issues.
    #[error("malformed content-analysis response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// Whether the error means the service was never configured, as opposed
    /// to a call that was attempted and failed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_credential_is_unavailable() {
        assert!(ServiceError::MissingCredential.is_unavailable());
        assert!(!ServiceError::MalformedResponse("x".to_owned()).is_unavailable());
        assert!(!ServiceError::Timeout { elapsed_ms: 10 }.is_unavailable());
    }

    #[test]
    fn test_http_error_display() {
        let err = ServiceError::Http {
            status: 503,
            message: "overloaded".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from content-analysis service: overloaded"
        );
    }
}
