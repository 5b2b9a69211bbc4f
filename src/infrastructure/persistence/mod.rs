//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - durable storage over a SQLite database
//! - [`InMemoryLinkRepository`] - process-local storage with the same contract

pub mod memory_link_repository;
pub mod sqlite_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
