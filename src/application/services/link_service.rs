//! Short link allocation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH, is_well_formed_code};
use crate::utils::url_validator::validate_target_url;
use tracing::{debug, error, info, warn};

/// Number of candidate codes tried before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Aggregate counters over all stored links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}

/// Service for creating and resolving shortened links.
///
/// Allocation generates a random code and lets the repository's uniqueness
/// constraint decide whether it is free, retrying on collision. There is no
/// existence check before inserting: under concurrency that check would race.
pub struct LinkService<L: LinkRepository + ?Sized, G: CodeGenerator + ?Sized> {
    link_repository: Arc<L>,
    code_generator: Arc<G>,
    code_length: usize,
}

/// Link service over type-erased collaborators, as held by the HTTP state.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn CodeGenerator>;

impl<L: LinkRepository + ?Sized, G: CodeGenerator + ?Sized> LinkService<L, G> {
    /// Creates a new link service generating codes of [`DEFAULT_CODE_LENGTH`].
    pub fn new(link_repository: Arc<L>, code_generator: Arc<G>) -> Self {
        Self {
            link_repository,
            code_generator,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Overrides the generated code length. Zero is clamped to one.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length.max(1);
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Validates `long_url` and allocates a short code for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] before any code is generated if the
    /// URL is not an absolute `http`/`https` URL with a host. Otherwise see
    /// [`Self::allocate`].
    pub async fn create_short_link(&self, long_url: &str) -> Result<Link, AppError> {
        validate_target_url(long_url).map_err(|e| AppError::invalid_url(long_url, e.to_string()))?;

        self.allocate(long_url).await
    }

    /// Stores `target_url` under a freshly generated unique code.
    ///
    /// `target_url` must already be validated. Up to
    /// [`MAX_ALLOCATION_ATTEMPTS`] candidates are tried; only a
    /// [`AppError::DuplicateCode`] from the repository leads to another attempt.
    ///
    /// # Errors
    ///
    /// - [`AppError::AllocationExhausted`] if every candidate collided
    /// - [`AppError::RandomSourceUnavailable`] if the generator fails
    /// - [`AppError::Storage`] on the first non-collision storage failure
    pub async fn allocate(&self, target_url: &str) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = self.code_generator.generate(self.code_length)?;

            match self
                .link_repository
                .insert(NewLink::new(code, target_url))
                .await
            {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    info!(code = %link.code, link_id = link.id, attempt, "Short link created");
                    return Ok(link);
                }
                Err(AppError::DuplicateCode { code }) => {
                    metrics::counter!("link_code_collisions_total").increment(1);
                    debug!(%code, attempt, "Short code collision, retrying");
                }
                Err(e) => {
                    error!(error = %e, attempt, "Failed to store short link");
                    return Err(e);
                }
            }
        }

        metrics::counter!("link_allocation_exhausted_total").increment(1);
        warn!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            code_length = self.code_length,
            "Short code space saturated: every candidate collided"
        );

        Err(AppError::AllocationExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }

    /// Resolves `code` to its target URL and records the visit.
    ///
    /// The click is counted by link id after the lookup. A failure to count
    /// is logged and dropped; it never fails the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown, empty, or
    /// contains a path separator (the latter two without touching storage).
    /// Returns [`AppError::Storage`] if the lookup fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self.get_link(code).await?;

        if let Err(e) = self.link_repository.increment_clicks(link.id).await {
            metrics::counter!("link_click_increment_failures_total").increment(1);
            warn!(code = %link.code, link_id = link.id, error = %e, "Failed to record click");
        }

        metrics::counter!("link_redirects_total").increment(1);
        Ok(link.target_url)
    }

    /// Retrieves a link by code without recording a visit.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed_code(code) {
            return Err(AppError::not_found(code));
        }

        self.link_repository.find_by_code(code).await
    }

    /// Returns the number of stored links and their summed clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        Ok(LinkTotals {
            links: self.link_repository.count().await?,
            clicks: self.link_repository.total_clicks().await?,
        })
    }

    /// Constructs the full short URL from a public origin and code.
    pub fn short_url(&self, origin: &str, code: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::utils::code_generator::{MockCodeGenerator, RandomCodeGenerator};
    use chrono::Utc;
    use mockall::Sequence;

    fn stored(new_link: NewLink) -> Link {
        Link::new(10, new_link.code, new_link.target_url, 0, Utc::now())
    }

    fn fixed_generator(code: &'static str) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .returning(move |_| Ok(code.to_string()));
        generator
    }

    #[tokio::test]
    async fn test_allocate_success_first_attempt() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "abc1234" && new_link.target_url == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(
            Arc::new(mock_link_repo),
            Arc::new(fixed_generator("abc1234")),
        );

        let link = service.allocate("https://example.com").await.unwrap();
        assert_eq!(link.code, "abc1234");
        assert_eq!(link.target_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_allocate_retries_after_collision() {
        let mut seq = Sequence::new();
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("taken00".to_string()));
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("fresh00".to_string()));

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "taken00")
            .times(1)
            .returning(|new_link| Err(AppError::DuplicateCode { code: new_link.code }));
        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "fresh00")
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(generator));

        let link = service.allocate("https://example.com").await.unwrap();
        assert_eq!(link.code, "fresh00");
    }

    #[tokio::test]
    async fn test_allocate_exhausted_after_five_attempts() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok("same000".to_string()));

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|new_link| Err(AppError::DuplicateCode { code: new_link.code }));

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(generator));

        let result = service.allocate("https://example.com").await;
        assert!(matches!(
            result,
            Err(AppError::AllocationExhausted { attempts: 5 })
        ));
    }

    #[tokio::test]
    async fn test_allocate_storage_error_is_not_retried() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("abc1234".to_string()));

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::storage("database is locked")));

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(generator));

        let result = service.allocate("https://example.com").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_allocate_random_source_failure() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(AppError::RandomSourceUnavailable("no entropy".into())));

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(generator));

        let result = service.allocate("https://example.com").await;
        assert!(matches!(result, Err(AppError::RandomSourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_allocate_passes_configured_length() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .withf(|length| *length == 10)
            .times(1)
            .returning(|_| Ok("abcdefghij".to_string()));

        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .returning(|new_link| Ok(stored(new_link)));

        let service =
            LinkService::new(Arc::new(mock_link_repo), Arc::new(generator)).with_code_length(10);

        assert!(service.allocate("https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_urls_generate_nothing() {
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(generator));

        for url in ["not-a-url", "ftp://host/x", "http:///nohost", ""] {
            let result = service.create_short_link(url).await;
            assert!(
                matches!(result, Err(AppError::InvalidUrl { .. })),
                "{url:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_short_link_valid_url() {
        let service = LinkService::new(
            Arc::new(InMemoryLinkRepository::new()),
            Arc::new(RandomCodeGenerator),
        );

        let link = service
            .create_short_link("https://example.com/path")
            .await
            .unwrap();

        assert_eq!(link.code.len(), 7);
        assert!(link.code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_resolve_increments_by_id() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_code()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|code| {
                Ok(Link::new(
                    77,
                    code.to_string(),
                    "https://example.com/target".to_string(),
                    3,
                    Utc::now(),
                ))
            });
        mock_link_repo
            .expect_increment_clicks()
            .withf(|id| *id == 77)
            .times(1)
            .returning(|_| Ok(()));

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(RandomCodeGenerator));

        let target = service.resolve("abc1234").await.unwrap();
        assert_eq!(target, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_swallows_increment_failure() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_code().returning(|code| {
            Ok(Link::new(
                1,
                code.to_string(),
                "https://example.com".to_string(),
                0,
                Utc::now(),
            ))
        });
        mock_link_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::storage("disk I/O error")));

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(RandomCodeGenerator));

        let target = service.resolve("abc1234").await.unwrap();
        assert_eq!(target, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| Err(AppError::not_found(code)));
        mock_link_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(RandomCodeGenerator));

        let result = service.resolve("doesnotexist").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_storage() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_code().times(0);
        mock_link_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(RandomCodeGenerator));

        for code in ["", "a/b"] {
            let result = service.resolve(code).await;
            assert!(matches!(result, Err(AppError::NotFound { .. })));
        }
    }

    #[tokio::test]
    async fn test_resolve_storage_error_propagates() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_code()
            .returning(|_| Err(AppError::storage("connection refused")));
        mock_link_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), Arc::new(RandomCodeGenerator));

        let result = service.resolve("abc1234").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_exhaustion_against_real_store() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        let service = LinkService::new(repo.clone(), Arc::new(fixed_generator("fixed00")));

        service.allocate("https://first.example.com").await.unwrap();
        let result = service.allocate("https://second.example.com").await;

        assert!(matches!(result, Err(AppError::AllocationExhausted { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            service.resolve("fixed00").await.unwrap(),
            "https://first.example.com"
        );
    }

    #[tokio::test]
    async fn test_totals() {
        let service = LinkService::new(
            Arc::new(InMemoryLinkRepository::new()),
            Arc::new(RandomCodeGenerator),
        );

        let link = service.allocate("https://example.com").await.unwrap();
        service.resolve(&link.code).await.unwrap();
        service.resolve(&link.code).await.unwrap();

        assert_eq!(
            service.totals().await.unwrap(),
            LinkTotals {
                links: 1,
                clicks: 2
            }
        );
    }

    #[test]
    fn test_short_url() {
        let service = LinkService::new(
            Arc::new(InMemoryLinkRepository::new()),
            Arc::new(RandomCodeGenerator),
        );

        assert_eq!(
            service.short_url("http://localhost:8080", "abc1234"),
            "http://localhost:8080/abc1234"
        );
        assert_eq!(
            service.short_url("https://s.example.com/", "abc1234"),
            "https://s.example.com/abc1234"
        );
    }
}
