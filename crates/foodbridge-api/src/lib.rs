//! # foodbridge-api
//!
//! HTTP layer for FoodBridge: Axum handlers, DTOs, extractors,
//! middleware, and the router. All domain decisions live in the service
//! layer; this crate only translates between HTTP and services.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
