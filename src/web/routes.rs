//! HTML route configuration.

use crate::state::AppState;
use crate::web::handlers::{home_handler, shorten_form_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Browser-facing routes.
///
/// # Endpoints
///
/// - `GET  /`        - Submission form
/// - `POST /shorten` - Form submission, renders the short URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/shorten", post(shorten_form_handler))
}
