//! Storage and Directory Interfaces
//!
//! The conversation aggregator never talks to a concrete database; it goes
//! through these two traits. [`MessageStore`] covers the message table
//! (insert, scope queries, bulk read-marking), [`Directory`] resolves user
//! and ad IDs to displayable summaries. The server wires them to Postgres
//! via [`super::db`]; tests wire them to an in-memory store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::messaging::{AdSummary, ConversationKey, Message, NewMessage, UserSummary};

/// Errors from messaging operations
#[derive(Debug, Error)]
pub enum MessagingError {
    /// A referenced user does not exist (or no longer exists)
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    /// A referenced ad does not exist (or no longer exists)
    #[error("ad {0} not found")]
    AdNotFound(Uuid),

    /// A message body was empty or whitespace-only
    #[error("message body cannot be empty")]
    EmptyBody,

    /// The storage collaborator failed; propagated unchanged
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Queryable message store
///
/// All scope arguments follow the same convention: `sender`/`recipient` are
/// directional, `ad` is the optional ad context where `None` means the
/// general conversation between the two users. `None` is a scope of its
/// own, never a wildcard.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message with `is_read = false` and `created_at = now`
    async fn insert(&self, message: NewMessage) -> Result<Message, MessagingError>;

    /// Distinct (sender, ad) scopes over messages received by `recipient`
    async fn incoming_scopes(&self, recipient: Uuid)
        -> Result<Vec<ConversationKey>, MessagingError>;

    /// Distinct (recipient, ad) scopes over messages sent by `sender`
    async fn outgoing_scopes(&self, sender: Uuid) -> Result<Vec<ConversationKey>, MessagingError>;

    /// Most recent message from `sender` to `recipient` in the given scope
    async fn latest_between(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<Option<Message>, MessagingError>;

    /// Number of unread messages from `sender` to `recipient` in the scope
    async fn unread_count(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<u32, MessagingError>;

    /// Mark every unread message from `sender` to `recipient` in the scope
    /// as read; returns the number of rows that changed
    async fn mark_read(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<u64, MessagingError>;

    /// All messages between the two users in the scope, regardless of
    /// direction, ordered by `created_at` ascending
    async fn thread(
        &self,
        user_a: Uuid,
        user_b: Uuid,
        ad: Option<Uuid>,
    ) -> Result<Vec<Message>, MessagingError>;
}

/// Identity collaborator: resolves IDs to displayable records
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve a user ID, failing with [`MessagingError::UserNotFound`] if
    /// the ID is stale
    async fn user_summary(&self, id: Uuid) -> Result<UserSummary, MessagingError>;

    /// Resolve an ad ID, failing with [`MessagingError::AdNotFound`] if the
    /// ID is stale
    async fn ad_summary(&self, id: Uuid) -> Result<AdSummary, MessagingError>;
}
