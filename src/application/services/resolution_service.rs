//! Short code resolution service (the redirect hot path).

use std::sync::Arc;

use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use serde_json::json;

/// Service that turns a short code back into its long URL and records the visit.
///
/// Cost per call is one indexed lookup plus one atomic increment. The visit is
/// counted as soon as the lookup succeeds, whether or not the caller goes on to
/// redirect.
pub struct ResolutionService<R: UrlMappingRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlMappingRepository + ?Sized> ResolutionService<R> {
    /// Creates a new resolution service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves `short_code` to its long URL, incrementing the visit counter.
    ///
    /// No format check is made on `short_code`; an unknown code is simply not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code (nothing is written).
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let mapping = self
            .repository
            .find_by_short_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "shortCode": short_code }))
            })?;

        self.repository
            .increment_visits(&mapping.short_code)
            .await?;

        Ok(mapping.long_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlMapping;
    use crate::domain::repositories::MockUrlMappingRepository;
    use crate::error::StoreError;
    use chrono::Utc;

    fn create_test_mapping(code: &str, url: &str) -> UrlMapping {
        UrlMapping::new(
            1,
            code.to_string(),
            url.to_string(),
            "a@b.com".to_string(),
            Utc::now(),
            0,
        )
    }

    #[tokio::test]
    async fn test_resolve_returns_url_and_counts_visit() {
        let mut mock_repo = MockUrlMappingRepository::new();

        let mapping = create_test_mapping("abcd1234", "https://example.com/page");
        mock_repo
            .expect_find_by_short_code()
            .withf(|code| code == "abcd1234")
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));

        mock_repo
            .expect_increment_visits()
            .withf(|code| code == "abcd1234")
            .times(1)
            .returning(|_| Ok(()));

        let service = ResolutionService::new(Arc::new(mock_repo));

        let long_url = service.resolve("abcd1234").await.unwrap();

        assert_eq!(long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_does_not_write() {
        let mut mock_repo = MockUrlMappingRepository::new();

        mock_repo
            .expect_find_by_short_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo.expect_increment_visits().times(0);

        let service = ResolutionService::new(Arc::new(mock_repo));

        let result = service.resolve("zzzzzzzz").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_propagates_increment_failure() {
        let mut mock_repo = MockUrlMappingRepository::new();

        let mapping = create_test_mapping("abcd1234", "https://example.com");
        mock_repo
            .expect_find_by_short_code()
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));

        mock_repo
            .expect_increment_visits()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

        let service = ResolutionService::new(Arc::new(mock_repo));

        let result = service.resolve("abcd1234").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_resolve_propagates_lookup_failure() {
        let mut mock_repo = MockUrlMappingRepository::new();

        mock_repo
            .expect_find_by_short_code()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("timeout".to_string())));

        mock_repo.expect_increment_visits().times(0);

        let service = ResolutionService::new(Arc::new(mock_repo));

        let result = service.resolve("abcd1234").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }
}
