//! Unified application error type.
//!
//! Every fallible operation in the workspace returns [`AppError`] (usually
//! through the [`crate::result::AppResult`] alias). The [`ErrorKind`] is what
//! the API layer maps to an HTTP status; the message is safe to show to
//! clients except for `Database`, `Configuration`, and `Internal`, which are
//! logged and replaced with a generic message at the boundary.

use std::fmt;

/// Classifies an [`AppError`] for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Requested entity does not exist (or its existence is not revealed).
    NotFound,
    /// Missing, malformed, or expired credentials.
    Unauthenticated,
    /// Authenticated caller lacks the required role or ownership.
    Forbidden,
    /// Request payload failed validation.
    Validation,
    /// Entity is not in a status that permits the operation.
    InvalidState,
    /// Requested status change is not an allowed transition.
    InvalidTransition,
    /// Operation conflicts with existing state (duplicates).
    Conflict,
    /// Database-level failure.
    Database,
    /// Configuration loading or validation failure.
    Configuration,
    /// Unexpected internal failure.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code used in API error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::InvalidState => "INVALID_STATE",
            ErrorKind::InvalidTransition => "INVALID_TRANSITION",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Database => "DATABASE",
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error carrying a kind, a human-readable message, and an
/// optional source error.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Underlying cause, if any.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new error wrapping an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Entity not found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Missing or invalid credentials.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Caller is authenticated but not allowed.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Invalid request input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Entity status does not permit the operation.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    /// Disallowed status transition.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Duplicate or conflicting state.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Database failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Configuration failure.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Unexpected internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the message is safe to return to API clients verbatim.
    pub fn is_client_safe(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal
        )
    }
}

// Source errors are not clonable; a cloned error keeps kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Internal, "JSON serialization failed", e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, "I/O operation failed", e)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, "Failed to load configuration", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::not_found("Donation not found");
        assert_eq!(err.to_string(), "NOT_FOUND: Donation not found");
    }

    #[test]
    fn clone_drops_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = AppError::with_source(ErrorKind::Database, "Query failed", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Database);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn client_safe_excludes_internal_kinds() {
        assert!(AppError::validation("bad input").is_client_safe());
        assert!(AppError::invalid_state("not pending").is_client_safe());
        assert!(!AppError::database("connection lost").is_client_safe());
        assert!(!AppError::internal("oops").is_client_safe());
    }
}
