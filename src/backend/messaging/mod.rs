//! Private Messaging
//!
//! This module implements the conversation side of the marketplace: sending
//! messages, building a user's inbox, and opening threads.
//!
//! The aggregation logic in [`inbox`] depends only on the [`store`] traits,
//! never on a concrete database, so it can be exercised against an in-memory
//! store in tests. [`db`] provides the Postgres implementation used by the
//! server.

/// Postgres implementation of the store traits
pub mod db;

/// HTTP handlers for inbox, threads, and sending
pub mod handlers;

/// Conversation aggregation: build_inbox, open_thread, send_message
pub mod inbox;

/// Storage and directory interfaces the aggregator depends on
pub mod store;

pub use store::{Directory, MessageStore, MessagingError};
