//! # foodbridge-service
//!
//! Business logic service layer for FoodBridge. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases; HTTP handlers never touch repositories directly.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod donation;
pub mod notification;
pub mod workflow;

pub use account::{AccountService, AdminAccountService};
pub use context::RequestContext;
pub use donation::DonationService;
pub use notification::NotificationService;
pub use workflow::WorkflowService;
