//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short code mapping
//! - [`NewUrlMapping`] - Input for creating a mapping
//! - [`StoreSummary`] - Store-wide totals

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, StoreSummary, UrlMapping};
