//! Account services.

pub mod admin;
pub mod service;

pub use admin::AdminAccountService;
pub use service::AccountService;
