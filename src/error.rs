//! Error types and their HTTP representations.
//!
//! - [`AppError`] - service-level failures with a structured JSON body
//! - [`OnboardingError`] - the onboarding action taxonomy, rendered as `{"error": "..."}`
//! - [`AuthRejection`] - session guard rejections (401 or bounce redirect)

use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::dto::onboarding::ActionErrorResponse;
use crate::domain::onboarding::OnboardingError;

/// Header telling App Bridge to fetch a fresh session token and retry.
pub const RETRY_INVALID_SESSION_HEADER: &str = "x-shopify-retry-invalid-session-request";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Structured error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Converts into the serializable error payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl OnboardingError {
    /// HTTP status used at the action boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            OnboardingError::UnrecognizedIntent => StatusCode::BAD_REQUEST,
            OnboardingError::Transport
            | OnboardingError::Backend
            | OnboardingError::MalformedResponse => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OnboardingError {
    fn into_response(self) -> Response {
        let body = ActionErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Why the session guard refused a request.
#[derive(Debug)]
pub enum AuthRejection {
    /// Missing or invalid session token. App Bridge retries with a fresh one.
    InvalidSession { reason: &'static str },
    /// Document load without a token: redirect to the session-token bounce page.
    Bounce { location: String },
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::InvalidSession { reason } => {
                let mut response =
                    AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
                        .into_response();
                response.headers_mut().insert(
                    RETRY_INVALID_SESSION_HEADER,
                    HeaderValue::from_static("1"),
                );
                response
            }
            AuthRejection::Bounce { location } => Redirect::to(&location).into_response(),
        }
    }
}
