//! Backend Error Types
//!
//! Errors returned by HTTP handlers. Each variant maps to an HTTP status
//! code via [`BackendError::status_code`], and the whole enum implements
//! `IntoResponse` (see `conversion.rs`) so handlers can return it directly.

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::messaging::MessagingError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// A referenced record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// A unique constraint was violated (e.g. duplicate username)
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Internal failure outside the database (hashing, token signing)
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Messaging error (from the conversation aggregator)
    #[error(transparent)]
    Messaging(#[from] MessagingError),

    /// Shared error (from the shared module)
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Messaging(err) => match err {
                MessagingError::UserNotFound(_) | MessagingError::AdNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                MessagingError::EmptyBody => StatusCode::BAD_REQUEST,
                MessagingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Shared(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message as shown to clients
    ///
    /// Database details are never put in the response body; they are logged
    /// server-side by the `IntoResponse` conversion.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal { .. } => "Internal server error".to_string(),
            Self::Messaging(MessagingError::Database(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
