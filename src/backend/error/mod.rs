//! Backend Error Handling
//!
//! Error types for the HTTP layer and their conversion to responses.

/// HTTP response conversion
pub mod conversion;

/// Error type definitions
pub mod types;

pub use types::BackendError;
