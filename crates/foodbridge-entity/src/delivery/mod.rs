//! Delivery domain entities.

pub mod model;
pub mod status;

pub use model::{CreateDelivery, Delivery, DeliveryDetail};
pub use status::DeliveryStatus;
