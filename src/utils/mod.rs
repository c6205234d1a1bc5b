//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`location`] - Redirect target encoding

pub mod code_generator;
pub mod location;
