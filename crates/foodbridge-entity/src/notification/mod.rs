//! Notification domain entities.

pub mod model;
pub mod severity;

pub use model::{CreateNotification, Notification};
pub use severity::NotificationSeverity;
