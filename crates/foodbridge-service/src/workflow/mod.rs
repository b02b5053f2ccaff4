//! Workflow engine services.

pub mod service;

pub use service::WorkflowService;
