//! Repository trait for the short link registry.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::StorageError;
use async_trait::async_trait;

/// Result of a conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The code was free and is now reserved by the returned link.
    Inserted(ShortLink),
    /// A link with this code already exists. Nothing was written.
    AlreadyExists,
}

/// Durable mapping from short code to original URL plus click counter.
///
/// This is the single shared mutable resource of the service. All
/// coordination between concurrent requests is delegated to it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StorageError>;

    /// Inserts the link only if no link with the same code exists.
    ///
    /// The existence check and the write are a single atomic operation: of
    /// any number of concurrent calls with the same code, exactly one gets
    /// [`InsertOutcome::Inserted`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on any failure other than a duplicate code.
    async fn try_insert(&self, new_link: NewShortLink) -> Result<InsertOutcome, StorageError>;

    /// Adds one to the click counter of `code`.
    ///
    /// Not linearized with other increments; a lost update is acceptable.
    /// Incrementing an unknown code is a no-op.
    async fn increment_click_count(&self, code: &str) -> Result<(), StorageError>;

    /// Number of registered links.
    async fn count(&self) -> Result<i64, StorageError>;

    /// Sum of all click counters.
    async fn total_clicks(&self) -> Result<i64, StorageError>;
}
