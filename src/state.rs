//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AllocationService, AuthService, ResolutionService};
use crate::domain::repositories::UrlMappingRepository;

/// Application state shared across all request handlers.
///
/// Cloned per request; every field is reference-counted, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService<dyn UrlMappingRepository>>,
    pub resolution_service: Arc<ResolutionService<dyn UrlMappingRepository>>,
    pub auth_service: Arc<AuthService>,
    /// Direct store handle for health checks.
    pub repository: Arc<dyn UrlMappingRepository>,
    /// Front-end origin linked from the not-found page.
    pub client_domain: Option<String>,
}

impl AppState {
    /// Builds both services on top of a single shared store.
    pub fn new(
        repository: Arc<dyn UrlMappingRepository>,
        auth_service: AuthService,
        client_domain: Option<String>,
    ) -> Self {
        Self {
            allocation_service: Arc::new(AllocationService::new(repository.clone())),
            resolution_service: Arc::new(ResolutionService::new(repository.clone())),
            auth_service: Arc::new(auth_service),
            repository,
            client_domain,
        }
    }
}
