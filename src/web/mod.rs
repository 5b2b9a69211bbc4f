//! Web layer serving the HTML submission form.
//!
//! Uses Askama templates from `templates/` for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod routes;
