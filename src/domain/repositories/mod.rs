//! Repository trait definitions for the domain layer.
//!
//! # Available Repositories
//!
//! - [`UrlMappingRepository`] - The mapping store shared by allocation and resolution
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod url_mapping_repository;

pub use url_mapping_repository::UrlMappingRepository;

#[cfg(test)]
pub use url_mapping_repository::MockUrlMappingRepository;
