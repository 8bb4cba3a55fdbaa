// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the gateway.
//! Upstream failures are classified into a typed code so that the
//! fetch layer can decide how to degrade without stringly-typed dispatch.

use std::fmt;
use thiserror::Error;

/// Upstream API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the failure vocabulary is encoded in the type system. The Notion
/// API reports these as a `code` field on its error envelope; other
/// services fall back to the HTTP status variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// Credential is invalid or expired
    Unauthorized,
    /// Credential lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed the service's validation
    ValidationFailed,
    /// Upstream internal server error
    InternalError,
    /// Upstream is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this gateway doesn't recognize yet
    Unknown(String),
}

impl UpstreamErrorCode {
    /// Parse an upstream error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for UpstreamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main gateway error type.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Upstream service returned an error ({code}): {message}")]
    UpstreamService {
        code: UpstreamErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Results log failure: {0}")]
    Persistence(String),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::MalformedResponse(err.to_string())
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        GatewayError::Persistence(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip_through_display() {
        let code = UpstreamErrorCode::from_api_response("object_not_found");
        assert_eq!(code, UpstreamErrorCode::ObjectNotFound);
        assert_eq!(code.to_string(), "object_not_found");
    }

    #[test]
    fn unknown_codes_are_preserved_verbatim() {
        let code = UpstreamErrorCode::from_api_response("brand_new_failure");
        assert_eq!(
            code,
            UpstreamErrorCode::Unknown("brand_new_failure".to_string())
        );
        assert_eq!(code.to_string(), "brand_new_failure");
    }
}
