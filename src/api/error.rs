//! Unified API error handling
//!
//! Maps pipeline failures to the error object the frontend consumes:
//! `{ "error": string, "details"?: string }`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::ClassificationError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable error code
    pub error: String,
    /// Optional diagnostic detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or empty image payload (400)
    #[error("No image provided")]
    NoImage,

    /// Server-side credential missing (500)
    #[error("API key not configured")]
    MissingCredential,

    /// Upstream model call failed (502)
    #[error("AI analysis failed")]
    UpstreamFailure(String),

    /// Upstream returned nothing usable (502)
    #[error("Empty response from AI")]
    EmptyResponse,

    /// Upstream reply could not be decoded (502)
    #[error("Malformed response from AI")]
    MalformedResponse(String),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::NoImage => "no_image",
            ApiError::MissingCredential => "missing_credential",
            ApiError::UpstreamFailure(_) => "upstream_failure",
            ApiError::EmptyResponse => "empty_response",
            ApiError::MalformedResponse(_) => "malformed_response",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            // Upstream diagnostics are safe to return; the credential is
            // never part of them
            ApiError::UpstreamFailure(detail) | ApiError::MalformedResponse(detail) => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoImage => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamFailure(_)
            | ApiError::EmptyResponse
            | ApiError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        tracing::error!(
            error_type = self.error_code(),
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_code().to_string(),
            details: self.details(),
        })
    }
}

impl From<ClassificationError> for ApiError {
    fn from(err: ClassificationError) -> Self {
        match err {
            ClassificationError::NoImage => ApiError::NoImage,
            ClassificationError::MissingCredential => ApiError::MissingCredential,
            ClassificationError::UpstreamFailure(detail) => ApiError::UpstreamFailure(detail),
            ClassificationError::EmptyResponse => ApiError::EmptyResponse,
            ClassificationError::MalformedResponse(detail) => ApiError::MalformedResponse(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NoImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingCredential.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::UpstreamFailure("HTTP 500".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::EmptyResponse.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_details_only_for_diagnosable_failures() {
        assert!(ApiError::NoImage.details().is_none());
        assert!(ApiError::MissingCredential.details().is_none());
        assert_eq!(
            ApiError::MalformedResponse("bad json".to_string()).details(),
            Some("bad json".to_string())
        );
    }

    #[test]
    fn test_classification_error_conversion() {
        let err: ApiError = ClassificationError::UpstreamFailure("HTTP 503: busy".to_string()).into();
        assert!(matches!(err, ApiError::UpstreamFailure(_)));
        assert_eq!(err.error_code(), "upstream_failure");
    }
}
