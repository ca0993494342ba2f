//! Server Setup
//!
//! Configuration, shared state, and application initialization.

/// Environment configuration and database setup
pub mod config;

/// Application initialization
pub mod init;

/// Shared application state
pub mod state;
