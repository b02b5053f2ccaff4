//! # foodbridge-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all FoodBridge entities. Multi-entity workflow
//! transitions go through [`repositories::workflow::WorkflowRepository`],
//! which runs them in a single transaction.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
