//! Application error type shared by every layer.
//!
//! Each variant is one kind from the error taxonomy of the shortener core.
//! Only [`AppError::DuplicateCode`] is ever recovered locally (the allocation
//! loop retries on it); every other kind propagates to the transport layer,
//! which turns it into an HTTP response via [`IntoResponse`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Machine-readable error description.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The candidate long URL failed scheme/host validation.
    #[error("invalid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The store already holds a mapping for this code.
    ///
    /// Internal signal between the store and the allocation loop.
    #[error("short code {code:?} already exists")]
    DuplicateCode { code: String },

    /// Every allocation attempt collided with an existing code.
    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// Any durable-storage failure other than a code collision.
    #[error("storage error: {0}")]
    Storage(String),

    /// The request body is malformed (batch size, field lengths).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The code does not resolve to a stored mapping.
    #[error("short link {code:?} not found")]
    NotFound { code: String },

    /// The operating system entropy source failed.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

impl AppError {
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true for failures the caller can do nothing about.
    pub fn is_server_error(&self) -> bool {
        !matches!(
            self,
            Self::InvalidUrl { .. } | Self::Validation(_) | Self::NotFound { .. }
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::DuplicateCode { .. }
            | Self::Storage(_)
            | Self::RandomSourceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing description of this error.
    ///
    /// Server-side failures carry a generic message; their detail belongs in
    /// the logs, not in the response.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::InvalidUrl { url, reason } => ErrorInfo {
                code: "invalid_url",
                message: "Invalid URL. Please enter http(s)://...".to_string(),
                details: json!({ "url": url, "reason": reason }),
            },
            Self::Validation(message) => ErrorInfo {
                code: "validation_error",
                message: "Invalid request".to_string(),
                details: json!({ "message": message }),
            },
            Self::NotFound { code } => ErrorInfo {
                code: "not_found",
                message: "Short link not found".to_string(),
                details: json!({ "code": code }),
            },
            Self::AllocationExhausted { attempts } => ErrorInfo {
                code: "allocation_exhausted",
                message: "Failed to allocate a short code".to_string(),
                details: json!({ "attempts": attempts }),
            },
            Self::Storage(_) => ErrorInfo {
                code: "storage_error",
                message: "Database error".to_string(),
                details: json!({}),
            },
            Self::RandomSourceUnavailable(_) => ErrorInfo {
                code: "random_source_unavailable",
                message: "Cannot generate code".to_string(),
                details: json!({}),
            },
            Self::DuplicateCode { .. } => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
