//! Messaging Types
//!
//! Types for private messages between users and the conversations derived
//! from them. A conversation is not persisted anywhere; it is a grouping of
//! messages by (counterparty, optional ad) relative to a viewing user.

/// Message data structure
pub mod message;

/// Derived conversation summaries and scope keys
pub mod conversation;

pub use conversation::{
    AdSummary, Conversation, ConversationKey, InboxResponse, ThreadResponse, UserSummary,
};
pub use message::{Message, NewMessage, SendMessageRequest};
