//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase field names. Inputs are checked
//! with validator before reaching a service.

pub mod generate;
pub mod health;
pub mod url_mapping;
