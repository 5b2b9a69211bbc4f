//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store of short code → target URL mappings.
///
/// The uniqueness of `code` is enforced here and nowhere else: when several
/// callers insert the same code concurrently, exactly one succeeds and every
/// other one observes [`AppError::DuplicateCode`]. All methods must be safe
/// to call concurrently without external locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process double
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new mapping with zero clicks and a store-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the code is already taken.
    /// Returns [`AppError::Storage`] on any other failure.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a mapping by its short code (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has that code.
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Link, AppError>;

    /// Atomically adds one to the click counter of the mapping with `id`.
    ///
    /// An unknown `id` is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums the click counters of all stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
