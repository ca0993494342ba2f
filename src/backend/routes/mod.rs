//! Route Configuration

/// API route definitions
pub mod api_routes;

/// Main router assembly
pub mod router;
