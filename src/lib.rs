//! Adboard - Main Library
//!
//! Adboard is a classifieds marketplace backend built with Rust. Users
//! register, post ads, browse and search listings, and exchange private
//! messages about ads.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Serializable domain types used across the API surface
//!   - Listing types (ads, categories, search parameters)
//!   - Messaging types (messages, conversations, scope keys)
//!   - Shared error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with JSON API handlers
//!   - Conversation aggregation (inbox construction, read-state tracking)
//!   - Listing search and CRUD
//!   - Authentication, database persistence

pub mod backend;
pub mod shared;
