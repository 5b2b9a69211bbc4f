//! Form submission handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::home::HomeTemplate;
use crate::error::AppError;
use crate::state::AppState;

/// Form body posted by `templates/home.html`.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub long_url: String,
}

/// Template for the result page, rendering `templates/result.html`.
#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub short_url: String,
    pub long_url: String,
}

/// Shortens the submitted URL and shows the result page.
///
/// # Endpoint
///
/// `POST /shorten` (`application/x-www-form-urlencoded`, field `long_url`)
///
/// # Responses
///
/// - **200 OK**: result page with the short URL
/// - **400 Bad Request**: the form again, with a validation message
/// - **5xx**: JSON error body (allocation exhausted, storage, entropy failures)
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Response {
    let long_url = form.long_url.trim();

    match state.link_service.create_short_link(long_url).await {
        Ok(link) => ResultTemplate {
            short_url: state.short_url(&headers, &link.code),
            long_url: link.target_url,
        }
        .into_response(),
        Err(err @ AppError::InvalidUrl { .. }) => (
            StatusCode::BAD_REQUEST,
            HomeTemplate::with_error(err.to_error_info().message, long_url),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
