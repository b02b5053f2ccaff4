//! Concrete repository implementations.

pub mod claim;
pub mod delivery;
pub mod donation;
pub mod notification;
pub mod user;
pub mod workflow;

pub use claim::ClaimRepository;
pub use delivery::DeliveryRepository;
pub use donation::DonationRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use workflow::WorkflowRepository;
