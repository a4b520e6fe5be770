//! Error types for the certificate API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ErrorBody;

/// Result type alias for server lifecycle operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Configuration rejected at startup.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(String),
}

/// Errors returned to API callers.
///
/// The display string is the caller-facing `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request used a method other than POST.
    #[error("Only POST method is allowed")]
    MethodNotAllowed,

    /// `apiKey` did not match the shared secret.
    #[error("The provided API key is invalid")]
    InvalidApiKey,

    /// Required fields missing or malformed; one entry per problem.
    #[error("Invalid request parameters")]
    Validation(Vec<String>),

    /// Anything unexpected, including unparseable bodies.
    #[error("An unexpected error occurred")]
    Internal(String),
}

impl ApiError {
    /// Wire error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the JSON body sent to the caller.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            Self::Validation(problems) => Some(problems.clone()),
            Self::Internal(cause) => Some(vec![cause.clone()]),
            Self::MethodNotAllowed | Self::InvalidApiKey => None,
        };

        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use test_case::test_case;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test_case(ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED")]
    #[test_case(ApiError::InvalidApiKey, StatusCode::UNAUTHORIZED, "INVALID_API_KEY")]
    #[test_case(ApiError::Validation(vec![]), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[test_case(ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")]
    fn status_and_code(err: ApiError, status: StatusCode, code: &str) {
        assert_eq!(err.status(), status);
        assert_eq!(err.code(), code);
    }

    #[tokio::test]
    async fn invalid_api_key_body_has_no_details() {
        let response = ApiError::InvalidApiKey.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["error"], "INVALID_API_KEY");
        assert_eq!(json["message"], "The provided API key is invalid");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn validation_body_lists_problems() {
        let err = ApiError::Validation(vec!["personalInfo.name is required".into()]);
        let json = body_json(err.into_response()).await;

        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Invalid request parameters");
        assert_eq!(json["details"][0], "personalInfo.name is required");
    }

    #[tokio::test]
    async fn internal_body_carries_cause() {
        let json = body_json(ApiError::Internal("boom".into()).into_response()).await;

        assert_eq!(json["error"], "INTERNAL_ERROR");
        assert_eq!(json["message"], "An unexpected error occurred");
        assert_eq!(json["details"], serde_json::json!(["boom"]));
    }

    #[test]
    fn from_serde_error() {
        let serde_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err = ApiError::from(serde_err);

        assert!(matches!(err, ApiError::Internal(ref msg) if msg.contains("expected")));
    }

    #[test]
    fn server_error_display() {
        let err = ServerError::Config("api key must not be empty".into());
        assert_eq!(err.to_string(), "invalid configuration: api key must not be empty");
    }
}
