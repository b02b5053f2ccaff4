//! Claim domain entities.

pub mod model;
pub mod status;

pub use model::{Claim, ClaimDetail, CreateClaim};
pub use status::ClaimStatus;
