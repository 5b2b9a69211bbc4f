//! Submission form page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the submission form.
///
/// Renders `templates/home.html`. `error` is shown above the form when
/// non-empty.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub error: String,
    pub long_url: String,
}

impl HomeTemplate {
    pub fn empty() -> Self {
        Self {
            error: String::new(),
            long_url: String::new(),
        }
    }

    pub fn with_error(error: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            long_url: long_url.into(),
        }
    }
}

/// Renders the submission form.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    HomeTemplate::empty()
}
