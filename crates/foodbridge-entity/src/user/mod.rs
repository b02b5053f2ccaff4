//! User domain entities.

pub mod approval;
pub mod model;
pub mod role;

pub use approval::ApprovalStatus;
pub use model::User;
pub use role::UserRole;
