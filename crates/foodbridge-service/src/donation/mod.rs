//! Donation services.

pub mod service;

pub use service::DonationService;
