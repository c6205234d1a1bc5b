//! Short code allocation service.

use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::generate_code;
use serde_json::json;
use tracing::{debug, info, warn};

/// Upper bound on insert attempts for a single allocation.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Whether an allocation minted a new code or reused an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationOutcome {
    Created,
    Existing,
}

/// Result of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub short_code: String,
    pub outcome: AllocationOutcome,
}

/// Service that maps long URLs to short codes.
///
/// # Deduplication
///
/// A long URL that is already stored gets its existing code back, without
/// generating anything. The check and the insert are separate store calls, so
/// two concurrent first submissions of the same URL can both insert.
///
/// # Collision Recovery
///
/// The store rejects a taken short code with [`StoreError::DuplicateKey`]. The
/// service then draws a fresh candidate, up to [`MAX_ALLOCATION_ATTEMPTS`] times.
pub struct AllocationService<R: UrlMappingRepository + ?Sized> {
    repository: Arc<R>,
    generator: fn() -> String,
}

impl<R: UrlMappingRepository + ?Sized> AllocationService<R> {
    /// Creates a new allocation service using random codes.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, generate_code)
    }

    /// Creates a new allocation service with a custom code source.
    pub fn with_generator(repository: Arc<R>, generator: fn() -> String) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Returns the short code for `long_url`, creating a mapping owned by `owner` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty.
    /// Returns [`AppError::AllocationExhausted`] if every attempt collided.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    #[tracing::instrument(skip_all, fields(owner = %owner))]
    pub async fn allocate(&self, long_url: &str, owner: &str) -> Result<Allocation, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "Long URL is required",
                json!({ "field": "longUrl" }),
            ));
        }

        if let Some(existing) = self.repository.find_by_long_url(long_url).await? {
            debug!(short_code = %existing.short_code, "Long URL already mapped");
            return Ok(Allocation {
                short_code: existing.short_code,
                outcome: AllocationOutcome::Existing,
            });
        }

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let candidate = (self.generator)();
            let new_mapping =
                NewUrlMapping::new(candidate, long_url.to_string(), owner.to_string());

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(short_code = %mapping.short_code, attempt, "Short code allocated");
                    return Ok(Allocation {
                        short_code: mapping.short_code,
                        outcome: AllocationOutcome::Created,
                    });
                }
                Err(StoreError::DuplicateKey(constraint)) => {
                    warn!(attempt, %constraint, "Short code collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::allocation_exhausted(
            "Failed to generate unique short code",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Lists the mappings created by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn list_owned(&self, owner: &str) -> Result<Vec<UrlMapping>, AppError> {
        Ok(self.repository.list_by_owner(owner).await?)
    }
}
