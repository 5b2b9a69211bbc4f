//! # URL Shortener
//!
//! Maps long URLs to short random codes, stores the mapping in SQLite and
//! redirects visitors while counting clicks.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The `Link` entity and the storage contract
//! - **Application Layer** ([`application`]) - Allocation and resolution logic
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory stores
//! - **API Layer** ([`api`]) - JSON handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML submission form
//!
//! ## Code allocation
//!
//! Codes are 7 characters from `[A-Za-z0-9]`, drawn from the OS CSPRNG.
//! The store's `UNIQUE` constraint decides whether a candidate is free;
//! a collision is retried with a new candidate up to five times.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://data/urls.db"   # default
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{DynLinkService, LinkService};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
}
