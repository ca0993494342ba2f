//! Request Middleware

/// Authentication middleware and extractor
pub mod auth;
