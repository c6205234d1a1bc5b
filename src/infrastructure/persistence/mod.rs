//! Mapping store implementations.
//!
//! # Repositories
//!
//! - [`PgUrlMappingRepository`] - Durable storage in PostgreSQL via SQLx
//! - [`MemoryUrlMappingRepository`] - Process-local storage for development and tests
//!
//! Both enforce short code uniqueness themselves and report violations as
//! [`crate::error::StoreError::DuplicateKey`] carrying [`SHORT_CODE_CONSTRAINT`].

pub mod memory_url_mapping_repository;
pub mod pg_url_mapping_repository;

pub use memory_url_mapping_repository::MemoryUrlMappingRepository;
pub use pg_url_mapping_repository::PgUrlMappingRepository;

/// Name of the unique constraint on `url_mappings.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_mappings_short_code_key";
