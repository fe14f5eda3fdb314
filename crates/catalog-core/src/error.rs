//! Unified error types for all layers of the catalog.

use crate::LogContext;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use thiserror::Error;

/// The three failure kinds callers are allowed to observe.
///
/// Every [`CatalogError`] collapses onto one of these; transport adapters
/// decide on status codes by looking at the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Internal => "internal",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Entity not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Uniqueness violation, carries the conflicting name
    #[error("product with the same name already exists: {0}")]
    AlreadyExists(String),

    /// Rejected input, produced by transport adapters only
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Identifier generation failed
    #[error("Id generation error: {0}")]
    IdGeneration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote call failed below the application layer
    #[error("Transport error: {0}")]
    Transport(String),

    // ============ Internal Errors ============
    /// Internal error enriched with logging metadata
    #[error("Internal error: {message}")]
    Internal { message: String, context: LogContext },
}

impl CatalogError {
    /// Normalizes this error onto the three-member taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Validation(_)
            | Self::Database(_)
            | Self::IdGeneration(_)
            | Self::Configuration(_)
            | Self::Transport(_)
            | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an already-exists error for the given name.
    #[must_use]
    pub fn already_exists<T: Into<String>>(name: T) -> Self {
        Self::AlreadyExists(name.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error with an empty context.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal {
            message: message.into(),
            context: LogContext::default(),
        }
    }

    /// Reclassifies this error as `Internal`, attaching `context`.
    ///
    /// `NotFound` and `AlreadyExists` pass through untouched. An error that
    /// is already `Internal` keeps its message and has its context merged.
    #[must_use]
    pub fn into_internal(self, context: LogContext) -> Self {
        match self {
            Self::NotFound { .. } | Self::AlreadyExists(_) => self,
            Self::Internal {
                message,
                context: existing,
            } => Self::Internal {
                message,
                context: existing.merge(context),
            },
            other => Self::Internal {
                message: other.to_string(),
                context,
            },
        }
    }

    /// Logging metadata attached to this error, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&LogContext> {
        match self {
            Self::Internal { context, .. } => Some(context),
            _ => None,
        }
    }
}
