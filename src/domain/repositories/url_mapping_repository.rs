//! Repository trait for the mapping store.

use crate::domain::entities::{NewUrlMapping, StoreSummary, UrlMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// The single shared store behind allocation and resolution.
///
/// Every method is a suspension point with no ordering guarantee relative to
/// other in-flight requests. Two guarantees must hold under concurrency:
///
/// - `short_code` uniqueness is enforced by the store itself ([`Self::insert`])
/// - [`Self::increment_visits`] never loses an update
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlMappingRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Finds the mapping for a long URL.
    ///
    /// When several mappings exist for the same URL, the oldest one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the mapping for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str)
    -> Result<Option<UrlMapping>, StoreError>;

    /// Persists a new mapping with `total_visits = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the short code is already taken.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError>;

    /// Atomically adds one to the visit counter of a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping has this short code.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn increment_visits(&self, short_code: &str) -> Result<(), StoreError>;

    /// Lists every mapping created by `owner`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlMapping>, StoreError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Counts mappings and sums their visits.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn summary(&self) -> Result<StoreSummary, StoreError>;
}
