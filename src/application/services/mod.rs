//! Business logic services for the application layer.

pub mod link_service;

pub use link_service::{DynLinkService, LinkService, LinkTotals, MAX_ALLOCATION_ATTEMPTS};
