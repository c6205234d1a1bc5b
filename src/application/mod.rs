//! Application layer services implementing business logic.
//!
//! Services consume the store trait and expose the operations HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Short code allocation and owner listing
//! - [`services::resolution_service::ResolutionService`] - Short code resolution with visit counting
//! - [`services::auth_service::AuthService`] - Bearer token verification

pub mod services;
