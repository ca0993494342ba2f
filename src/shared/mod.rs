//! Shared Module
//!
//! This module contains serializable types that make up the API surface of
//! the marketplace: listings, categories, messages, conversations, and the
//! error types they share. All types here are plain data designed for JSON
//! transmission over HTTP.

/// Shared error types
pub mod error;

/// Listing types: ads, categories, search parameters
pub mod listings;

/// Messaging types: messages, conversations, scope keys
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use listings::{Ad, AdImage, Category, SearchParams};
pub use messaging::{Conversation, ConversationKey, Message};
