//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod all_urls;
pub mod generate;
pub mod health;
pub mod redirect;

pub use all_urls::all_urls_handler;
pub use generate::generate_handler;
pub use health::{health_handler, index_handler};
pub use redirect::redirect_handler;
