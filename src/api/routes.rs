//! API route configuration.

use crate::api::handlers::{get_link_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create shortened URLs (batch-capable)
/// - `GET  /links/{code}`  - Link metadata and click count
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links/{code}", get(get_link_handler))
}
