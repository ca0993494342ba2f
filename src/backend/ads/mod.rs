//! Listings
//!
//! Ad CRUD, category lookup, and search/browse with combinable filters.

/// Database operations for ads and categories
pub mod db;

/// HTTP handlers for listing endpoints
pub mod handlers;

/// Dynamic search query construction
pub mod search;
