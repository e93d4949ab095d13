use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ConfigError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{message} (status {status})")]
    UpstreamError {
        message: String,
        status: u16,
        details: String,
    },

    #[error("Failed to reach upstream: {0}")]
    FetchError(String),

    #[error("{message}: {details}")]
    InternalError { message: String, details: String },
}

impl AppError {
    /// Rewrites transport failures into the route's generic 500 message.
    /// Everything else already carries its own status and body.
    pub fn at_boundary(self, message: &str) -> Self {
        match self {
            AppError::FetchError(details) => {
                error!(%details, "{}", message);
                AppError::InternalError {
                    message: message.to_string(),
                    details,
                }
            }
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::FetchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::ConfigError(msg) | AppError::ValidationError(msg) => ErrorResponse {
                error: msg,
                status: None,
                details: None,
            },
            AppError::UpstreamError {
                message,
                status,
                details,
            } => ErrorResponse {
                error: message,
                status: Some(status),
                details: Some(details),
            },
            AppError::FetchError(details) => ErrorResponse {
                error: "Internal server error".to_string(),
                status: None,
                details: Some(details),
            },
            AppError::InternalError { message, details } => ErrorResponse {
                error: message,
                status: None,
                details: Some(details),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
