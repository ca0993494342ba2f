//! Message Data Structure
//!
//! A private message from one user to another, optionally in the context of
//! an ad. Messages are immutable once sent except for `is_read`, which only
//! ever transitions false to true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored private message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,
    /// Sending user ID
    pub sender_id: Uuid,
    /// Receiving user ID
    pub recipient_id: Uuid,
    /// Ad the message is about, if any; a message without an ad belongs to
    /// the general conversation between the two users
    pub ad_id: Option<Uuid>,
    /// Message body text
    pub body: String,
    /// When the message was sent
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has opened the thread since this arrived
    pub is_read: bool,
}

/// A message about to be sent, before the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub ad_id: Option<Uuid>,
    pub body: String,
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: Uuid,
    /// Ad context, omitted for a general message
    #[serde(default)]
    pub ad_id: Option<Uuid>,
    pub body: String,
}
