//! Backend Module
//!
//! Server-side code for the marketplace: the axum HTTP server, the
//! conversation aggregator, listing search, authentication, and the
//! Postgres persistence layer behind them.

/// Listing search and CRUD
pub mod ads;

/// User accounts, sessions, signup/login handlers
pub mod auth;

/// Backend error types and HTTP response conversion
pub mod error;

/// Private messaging: conversation aggregation and thread handling
pub mod messaging;

/// Request middleware (authentication)
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup: config, state, initialization
pub mod server;
