//! Core domain entities.
//!
//! - [`Link`] - a stored short code → target URL mapping
//! - [`NewLink`] - input for creating a mapping; the store fills in the rest

pub mod link;

pub use link::{Link, NewLink};
