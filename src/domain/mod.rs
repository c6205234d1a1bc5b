//! Domain layer: entities and the mapping store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on a particular database.
//! Allocation and resolution logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
