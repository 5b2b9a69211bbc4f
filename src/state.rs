//! Shared state injected into every HTTP handler.

use axum::http::HeaderMap;
use std::sync::Arc;

use crate::application::services::DynLinkService;
use crate::utils::request_origin::request_origin;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Fixed public origin for short URLs; derived per request when `None`.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, base_url: Option<String>) -> Self {
        Self {
            link_service,
            base_url,
        }
    }

    /// Returns the origin short URLs are built on for this request.
    pub fn origin(&self, headers: &HeaderMap) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => request_origin(headers),
        }
    }

    /// Builds the public short URL for `code` as seen by this request.
    pub fn short_url(&self, headers: &HeaderMap, code: &str) -> String {
        self.link_service.short_url(&self.origin(headers), code)
    }
}
