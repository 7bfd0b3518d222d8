use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Infrastructure failures: outbound HTTP, decoding, configuration, sandbox policy.
#[derive(Debug, Error)]
pub enum NeoWatchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Upstream returned HTTP {status} for {endpoint}")]
    UpstreamStatus { status: u16, endpoint: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    SecurityError(String),
}

pub type Result<T> = std::result::Result<T, NeoWatchError>;

/// Errors that cross the HTTP boundary.
///
/// Handlers and the orchestration layer return `Result<_, ApiError>`; the
/// `IntoResponse` impl below is the only place an error becomes a response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-policy input, including missing server configuration.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Auth provider unavailable or not configured.
    #[error("{0}")]
    Unauthorized(String),

    /// Missing, malformed or rejected bearer token.
    #[error("{0}")]
    InvalidToken(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[source] NeoWatchError),
}

impl ApiError {
    pub fn invalid_token() -> Self {
        ApiError::InvalidToken("Invalid or expired token".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)   => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)     => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_)     => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message shown to the client. Upstream details stay in the server log.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Upstream(_) => "Upstream request failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<NeoWatchError> for ApiError {
    fn from(err: NeoWatchError) -> Self {
        match err {
            NeoWatchError::Config(msg) => ApiError::Validation(msg),
            other => ApiError::Upstream(other),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
