use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the signal engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Malformed series at index {index}: timestamp {current} does not follow {previous}")]
    MalformedSeries {
        index: usize,
        previous: i64,
        current: i64,
    },
}

impl SignalError {
    pub(crate) fn window(name: &str) -> Self {
        SignalError::InvalidParameter {
            name: name.to_string(),
            reason: "must be at least 1".to_string(),
        }
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Signal(_) => StatusCode::BAD_REQUEST,
            AppError::Reqwest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::BadRequest(msg) | AppError::ExternalApi(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
