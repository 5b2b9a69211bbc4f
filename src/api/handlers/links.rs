//! Handler for link lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns metadata for a short link without recording a visit.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Response
///
/// ```json
/// {
///   "code": "aZ3kP9q",
///   "target_url": "https://example.com/a/b?c=1",
///   "short_url": "http://localhost:8080/aZ3kP9q",
///   "clicks": 3,
///   "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let short_url = state.short_url(&headers, &link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}
