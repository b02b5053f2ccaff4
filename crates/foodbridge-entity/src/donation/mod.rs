//! Donation domain entities.

pub mod model;
pub mod status;

pub use model::{CreateDonation, Donation};
pub use status::DonationStatus;
