//! Conversation Data Structures
//!
//! A conversation is derived, never persisted: relative to a viewing user it
//! is identified by a [`ConversationKey`] of (counterparty, optional ad).
//! Messages between the same two users about different ads form different
//! conversations, and messages with no ad context form their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::Message;

/// Scope key identifying one conversation relative to a viewing user
///
/// `ad: None` is the sentinel for "no ad context"; by type it can never
/// collide with a real ad ID, so (counterparty, None) and
/// (counterparty, Some(ad)) are always distinct conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    /// The other participant's user ID
    pub counterparty: Uuid,
    /// Ad context, if the conversation is about a listing
    pub ad: Option<Uuid>,
}

impl ConversationKey {
    pub fn new(counterparty: Uuid, ad: Option<Uuid>) -> Self {
        Self { counterparty, ad }
    }
}

/// Displayable identity of a user, as resolved by the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

/// Displayable summary of an ad, as resolved by the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSummary {
    pub id: Uuid,
    pub title: String,
}

/// One entry in a user's inbox
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// The other participant
    pub counterparty: UserSummary,
    /// Ad context, if any
    pub ad: Option<AdSummary>,
    /// Most recent message in this scope (for preview)
    pub last_message: Option<Message>,
    /// Messages sent to the viewing user in this scope that are unread
    pub unread_count: u32,
}

impl Conversation {
    /// Timestamp of the last message, used for inbox ordering
    ///
    /// `None` sorts before any real timestamp, so a conversation whose last
    /// message cannot be resolved lands at the bottom of the inbox.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_message.as_ref().map(|m| m.created_at)
    }
}

/// Response for the inbox endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxResponse {
    pub conversations: Vec<Conversation>,
}

/// Response for the thread endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub counterparty: UserSummary,
    pub ad: Option<AdSummary>,
    pub messages: Vec<Message>,
}
