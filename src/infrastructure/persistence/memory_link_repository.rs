//! In-process link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, Link>,
    code_by_id: HashMap<i64, String>,
}

/// [`LinkRepository`] kept entirely in memory.
///
/// Follows the same contract and error taxonomy as the SQLite store, with a
/// single mutex standing in for the database's constraint machinery. Data
/// is lost when the value is dropped.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::storage("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.lock()?;

        if inner.by_code.contains_key(&new_link.code) {
            return Err(AppError::DuplicateCode {
                code: new_link.code,
            });
        }

        inner.next_id += 1;
        let link = Link::new(
            inner.next_id,
            new_link.code,
            new_link.target_url,
            0,
            Utc::now(),
        );

        inner.code_by_id.insert(link.id, link.code.clone());
        inner.by_code.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.lock()?
            .by_code
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found(code))
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;

        let Some(code) = inner.code_by_id.get(&id).cloned() else {
            return Ok(());
        };
        if let Some(link) = inner.by_code.get_mut(&code) {
            link.clicks += 1;
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.by_code.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.by_code.values().map(|l| l.clicks).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_zero_clicks() {
        let repo = InMemoryLinkRepository::new();

        let first = repo
            .insert(NewLink::new("aaaaaaa", "https://a.example.com"))
            .await
            .unwrap();
        let second = repo
            .insert(NewLink::new("bbbbbbb", "https://b.example.com"))
            .await
            .unwrap();

        assert_eq!(first.clicks, 0);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_insert_duplicate_code() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(NewLink::new("dup1234", "https://a.example.com"))
            .await
            .unwrap();

        let result = repo
            .insert(NewLink::new("dup1234", "https://b.example.com"))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateCode { code }) if code == "dup1234"));

        let stored = repo.find_by_code("dup1234").await.unwrap();
        assert_eq!(stored.target_url, "https://a.example.com");
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(NewLink::new("AbCdEfG", "https://upper.example.com"))
            .await
            .unwrap();
        repo.insert(NewLink::new("abcdefg", "https://lower.example.com"))
            .await
            .unwrap();

        assert_eq!(
            repo.find_by_code("AbCdEfG").await.unwrap().target_url,
            "https://upper.example.com"
        );
        assert_eq!(
            repo.find_by_code("abcdefg").await.unwrap().target_url,
            "https://lower.example.com"
        );
    }

    #[tokio::test]
    async fn test_find_missing_code() {
        let repo = InMemoryLinkRepository::new();

        let result = repo.find_by_code("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = InMemoryLinkRepository::new();
        let link = repo
            .insert(NewLink::new("clk1234", "https://example.com"))
            .await
            .unwrap();

        repo.increment_clicks(link.id).await.unwrap();
        repo.increment_clicks(link.id).await.unwrap();

        assert_eq!(repo.find_by_code("clk1234").await.unwrap().clicks, 2);
        assert_eq!(repo.total_clicks().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_increment_unknown_id_is_noop() {
        let repo = InMemoryLinkRepository::new();

        assert!(repo.increment_clicks(42).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
