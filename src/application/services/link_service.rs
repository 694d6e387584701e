//! Short link registration service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RegistrationConfig;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::{AppError, StorageError};
use crate::utils::code_generator::CodeGenerator;
use crate::utils::validation::{is_valid_slug, is_valid_url};

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredLink {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
}

/// Service for registering new short links.
///
/// Either honors a caller-supplied slug with a single insert attempt, or
/// generates random codes until the registry accepts one or the retry
/// budget from [`RegistrationConfig`] runs out.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
    config: RegistrationConfig,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<L>,
        generator: Arc<dyn CodeGenerator>,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    /// Registers `original_url`, optionally under `custom_slug`.
    ///
    /// An empty `custom_slug` is treated the same as `None` and gets a
    /// generated code; it is the one non-matching slug that does not yield
    /// [`AppError::InvalidSlug`].
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not absolute http/https
    /// - [`AppError::InvalidSlug`] if the custom slug fails the syntax check
    /// - [`AppError::SlugTaken`] if the custom slug is already registered
    /// - [`AppError::GenerationExhausted`] if every generated code collided
    /// - [`AppError::Storage`] on any store failure, or when the registration
    ///   deadline passes
    ///
    /// Validation errors are returned before the registry is touched.
    pub async fn register(
        &self,
        original_url: &str,
        custom_slug: Option<&str>,
    ) -> Result<RegisteredLink, AppError> {
        if !is_valid_url(original_url) {
            return Err(AppError::InvalidUrl);
        }

        let custom_slug = custom_slug.filter(|slug| !slug.is_empty());
        if let Some(slug) = custom_slug
            && !is_valid_slug(slug)
        {
            return Err(AppError::InvalidSlug);
        }

        let link = match tokio::time::timeout(
            self.config.timeout,
            self.reserve(original_url, custom_slug),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Registration timed out"
                );
                return Err(StorageError::Timeout.into());
            }
        };

        info!(code = %link.short_code, "Short link created");

        Ok(RegisteredLink {
            short_url: self.short_url(&link.short_code),
            short_code: link.short_code,
            original_url: link.original_url,
        })
    }

    /// Builds the externally visible short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), code)
    }

    async fn reserve(
        &self,
        original_url: &str,
        custom_slug: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        match custom_slug {
            Some(slug) => self.insert_custom(original_url, slug).await,
            None => self.insert_generated(original_url).await,
        }
    }

    /// Single insert attempt for a caller-chosen slug. Never retried.
    async fn insert_custom(&self, original_url: &str, slug: &str) -> Result<ShortLink, AppError> {
        match self
            .repository
            .try_insert(NewShortLink::new(slug, original_url))
            .await?
        {
            InsertOutcome::Inserted(link) => Ok(link),
            InsertOutcome::AlreadyExists => Err(AppError::SlugTaken {
                slug: slug.to_string(),
            }),
        }
    }

    /// Generates candidates until one is accepted.
    ///
    /// Only a collision is retried. Any storage error aborts immediately.
    async fn insert_generated(&self, original_url: &str) -> Result<ShortLink, AppError> {
        let attempts = self.config.max_attempts;

        for attempt in 1..=attempts {
            let candidate = self.generator.generate();

            match self
                .repository
                .try_insert(NewShortLink::new(candidate.as_str(), original_url))
                .await?
            {
                InsertOutcome::Inserted(link) => return Ok(link),
                InsertOutcome::AlreadyExists => {
                    debug!(attempt, code = %candidate, "Short code collision, retrying");
                }
            }
        }

        warn!(attempts, "Failed to generate unique short code");
        Err(AppError::GenerationExhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::MockCodeGenerator;
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::Sequence;
    use std::time::Duration;

    fn test_config() -> RegistrationConfig {
        RegistrationConfig {
            base_url: "https://s.example.com/".to_string(),
            code_length: 6,
            max_attempts: 10,
            timeout: Duration::from_secs(5),
        }
    }

    fn stored(new_link: &NewShortLink) -> ShortLink {
        ShortLink::new(
            1,
            new_link.short_code.clone(),
            new_link.original_url.clone(),
            0,
            Utc::now(),
        )
    }

    fn generator_returning(code: &'static str) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().returning(move || code.to_string());
        generator
    }

    fn service(
        repo: MockLinkRepository,
        generator: MockCodeGenerator,
    ) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), Arc::new(generator), test_config())
    }

    #[tokio::test]
    async fn test_register_generated_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .withf(|new_link| {
                new_link.short_code == "Xk9pL2" && new_link.original_url == "https://example.com/a/b"
            })
            .times(1)
            .returning(|new_link| Ok(InsertOutcome::Inserted(stored(&new_link))));

        let service = service(repo, generator_returning("Xk9pL2"));

        let link = service
            .register("https://example.com/a/b", None)
            .await
            .unwrap();

        assert_eq!(link.short_code, "Xk9pL2");
        assert_eq!(link.original_url, "https://example.com/a/b");
        assert_eq!(link.short_url, "https://s.example.com/Xk9pL2");
    }

    #[tokio::test]
    async fn test_register_invalid_url_touches_nothing() {
        let repo = MockLinkRepository::new();
        let generator = MockCodeGenerator::new();
        let service = service(repo, generator);

        let result = service.register("not-a-url", None).await;

        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_register_rejects_non_http_scheme() {
        let service = service(MockLinkRepository::new(), MockCodeGenerator::new());

        let result = service.register("javascript:alert(1)", None).await;

        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_register_invalid_slug_touches_nothing() {
        let service = service(MockLinkRepository::new(), MockCodeGenerator::new());

        let too_long = "x".repeat(51);
        for slug in ["ab", "has space", "emoji\u{1f600}", too_long.as_str()] {
            let result = service.register("https://example.com", Some(slug)).await;
            assert!(matches!(result, Err(AppError::InvalidSlug)), "{slug}");
        }
    }

    #[tokio::test]
    async fn test_register_url_checked_before_slug() {
        let service = service(MockLinkRepository::new(), MockCodeGenerator::new());

        let result = service.register("ftp://example.com", Some("ab")).await;

        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_register_custom_slug() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .withf(|new_link| new_link.short_code == "my-promo_2024")
            .times(1)
            .returning(|new_link| Ok(InsertOutcome::Inserted(stored(&new_link))));

        let service = service(repo, MockCodeGenerator::new());

        let link = service
            .register("https://example.com", Some("my-promo_2024"))
            .await
            .unwrap();

        assert_eq!(link.short_code, "my-promo_2024");
        assert_eq!(link.short_url, "https://s.example.com/my-promo_2024");
    }

    #[tokio::test]
    async fn test_register_empty_slug_generates_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(1)
            .returning(|new_link| Ok(InsertOutcome::Inserted(stored(&new_link))));

        let service = service(repo, generator_returning("abc123"));

        let link = service
            .register("https://example.com", Some(""))
            .await
            .unwrap();

        assert_eq!(link.short_code, "abc123");
    }

    #[tokio::test]
    async fn test_register_custom_slug_taken() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(1)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let service = service(repo, MockCodeGenerator::new());

        let result = service
            .register("https://second.com", Some("taken123"))
            .await;

        match result {
            Err(AppError::SlugTaken { slug }) => assert_eq!(slug, "taken123"),
            other => panic!("expected SlugTaken, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_custom_slug_storage_error_not_retried() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("down".into())));

        let service = service(repo, MockCodeGenerator::new());

        let result = service.register("https://example.com", Some("promo")).await;

        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_retries_on_collision() {
        let mut seq = Sequence::new();
        let mut generator = MockCodeGenerator::new();
        for code in ["taken1", "taken2", "free03"] {
            generator
                .expect_generate()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || code.to_string());
        }

        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .withf(|new_link| new_link.short_code.starts_with("taken"))
            .times(2)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));
        repo.expect_try_insert()
            .withf(|new_link| new_link.short_code == "free03")
            .times(1)
            .returning(|new_link| Ok(InsertOutcome::Inserted(stored(&new_link))));

        let service = service(repo, generator);

        let link = service.register("https://example.com", None).await.unwrap();

        assert_eq!(link.short_code, "free03");
    }

    #[tokio::test]
    async fn test_register_exhausts_retry_budget() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(10)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(10)
            .returning(|| "dupdup".to_string());

        let service = service(repo, generator);

        let result = service.register("https://example.com", None).await;

        assert!(matches!(
            result,
            Err(AppError::GenerationExhausted { attempts: 10 })
        ));
    }

    #[tokio::test]
    async fn test_register_honors_configured_retry_budget() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(3)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let config = RegistrationConfig {
            max_attempts: 3,
            ..test_config()
        };
        let service = LinkService::new(
            Arc::new(repo),
            Arc::new(generator_returning("dupdup")),
            config,
        );

        let result = service.register("https://example.com", None).await;

        assert!(matches!(
            result,
            Err(AppError::GenerationExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_register_storage_error_aborts_generation() {
        let mut repo = MockLinkRepository::new();
        repo.expect_try_insert()
            .times(1)
            .returning(|_| Err(StorageError::Database(sqlx::Error::PoolTimedOut)));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|| "abc123".to_string());

        let service = service(repo, generator);

        let result = service.register("https://example.com", None).await;

        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::Database(_)))
        ));
    }

    struct StalledRepository;

    #[async_trait]
    impl LinkRepository for StalledRepository {
        async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, StorageError> {
            Ok(None)
        }

        async fn try_insert(&self, _new_link: NewShortLink) -> Result<InsertOutcome, StorageError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(InsertOutcome::AlreadyExists)
        }

        async fn increment_click_count(&self, _code: &str) -> Result<(), StorageError> {
            Ok(())
        }

        async fn count(&self) -> Result<i64, StorageError> {
            Ok(0)
        }

        async fn total_clicks(&self) -> Result<i64, StorageError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_register_times_out_as_storage_error() {
        let config = RegistrationConfig {
            timeout: Duration::from_millis(20),
            ..test_config()
        };
        let service = LinkService::new(
            Arc::new(StalledRepository),
            Arc::new(generator_returning("slow01")),
            config,
        );

        let result = service.register("https://example.com", None).await;

        assert!(matches!(result, Err(AppError::Storage(StorageError::Timeout))));
    }

    #[test]
    fn test_short_url_joins_base_and_code() {
        let service = service(MockLinkRepository::new(), MockCodeGenerator::new());
        assert_eq!(service.short_url("abc123"), "https://s.example.com/abc123");
    }
}
