use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::InvokeError;
use thiserror::Error;

/// Prefix of every invocation failure detail.
pub const FAILURE_LABEL: &str = "Lambda invocation failed";

/// Errors returned by gateway handlers, rendered as `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Any invocation failure; always a 500.
    #[error("Lambda invocation failed: {0}")]
    Invocation(#[from] InvokeError),

    /// The request body was not a valid `{"value": <string>}` document.
    #[error("{message}")]
    InvalidBody {
        /// Status chosen by the JSON extractor.
        status: StatusCode,
        /// Extractor explanation.
        message: String,
    },
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl GatewayError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Invocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
