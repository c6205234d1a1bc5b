//! Business logic services for the application layer.

pub mod allocation_service;
pub mod auth_service;
pub mod resolution_service;

pub use allocation_service::{
    Allocation, AllocationOutcome, AllocationService, MAX_ALLOCATION_ATTEMPTS,
};
pub use auth_service::{AuthService, Identity};
pub use resolution_service::ResolutionService;
