//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates shortened URLs for one or more long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// Processes URLs independently. If one fails, others continue processing.
/// Each result includes either success data or error information.
///
/// # Request Body
///
/// ```json
/// { "urls": [ { "url": "https://example.com/a/b?c=1" } ] }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 1, "successful": 1, "failed": 0 },
///   "items": [
///     {
///       "long_url": "https://example.com/a/b?c=1",
///       "code": "aZ3kP9q",
///       "short_url": "http://localhost:8080/aZ3kP9q"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the request body fails validation.
/// Individual URL errors are returned in the response items array.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let total = payload.urls.len();
    let mut results = Vec::with_capacity(total);
    let mut successful = 0;
    let mut failed = 0;

    for item in payload.urls {
        let long_url = item.url.trim().to_string();

        match state.link_service.create_short_link(&long_url).await {
            Ok(link) => {
                successful += 1;
                let short_url = state.short_url(&headers, &link.code);
                results.push(ShortenResultItem::Success {
                    long_url,
                    code: link.code,
                    short_url,
                });
            }
            Err(err) => {
                if err.is_server_error() {
                    tracing::error!(error = %err, "Failed to shorten URL");
                }
                failed += 1;
                results.push(ShortenResultItem::Error {
                    long_url,
                    error: err.to_error_info(),
                });
            }
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed,
        },
        items: results,
    }))
}
