//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod claim;
pub mod delivery;
pub mod donation;
pub mod health;
pub mod notification;
pub mod user;
