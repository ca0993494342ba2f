//! Postgres Store Implementation
//!
//! Implements [`MessageStore`] and [`Directory`] over sqlx. Ad scopes use
//! `IS NOT DISTINCT FROM` so that a `None` ad context matches exactly the
//! NULL rows and nothing else.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::messaging::{AdSummary, ConversationKey, Message, NewMessage, UserSummary};

use super::store::{Directory, MessageStore, MessagingError};

/// Message store backed by the `messages` table
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert(&self, message: NewMessage) -> Result<Message, MessagingError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let stored = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, sender_id, recipient_id, ad_id, body, created_at, is_read)
            VALUES ($1, $2, $3, $4, $5, $6, false)
            RETURNING id, sender_id, recipient_id, ad_id, body, created_at, is_read
            "#,
        )
        .bind(id)
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(message.ad_id)
        .bind(&message.body)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn incoming_scopes(
        &self,
        recipient: Uuid,
    ) -> Result<Vec<ConversationKey>, MessagingError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT sender_id, ad_id
            FROM messages
            WHERE recipient_id = $1
            "#,
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ConversationKey::new(row.get("sender_id"), row.get("ad_id")))
            .collect())
    }

    async fn outgoing_scopes(&self, sender: Uuid) -> Result<Vec<ConversationKey>, MessagingError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT recipient_id, ad_id
            FROM messages
            WHERE sender_id = $1
            "#,
        )
        .bind(sender)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ConversationKey::new(row.get("recipient_id"), row.get("ad_id")))
            .collect())
    }

    async fn latest_between(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<Option<Message>, MessagingError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, ad_id, body, created_at, is_read
            FROM messages
            WHERE sender_id = $1 AND recipient_id = $2 AND ad_id IS NOT DISTINCT FROM $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(ad)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn unread_count(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<u32, MessagingError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM messages
            WHERE sender_id = $1 AND recipient_id = $2
              AND ad_id IS NOT DISTINCT FROM $3
              AND is_read = false
            "#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(ad)
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.get("count");
        Ok(count as u32)
    }

    async fn mark_read(
        &self,
        sender: Uuid,
        recipient: Uuid,
        ad: Option<Uuid>,
    ) -> Result<u64, MessagingError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = true
            WHERE sender_id = $1 AND recipient_id = $2
              AND ad_id IS NOT DISTINCT FROM $3
              AND is_read = false
            "#,
        )
        .bind(sender)
        .bind(recipient)
        .bind(ad)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn thread(
        &self,
        user_a: Uuid,
        user_b: Uuid,
        ad: Option<Uuid>,
    ) -> Result<Vec<Message>, MessagingError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, ad_id, body, created_at, is_read
            FROM messages
            WHERE ((sender_id = $1 AND recipient_id = $2)
                OR (sender_id = $2 AND recipient_id = $1))
              AND ad_id IS NOT DISTINCT FROM $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .bind(ad)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}

/// Directory backed by the `users` and `ads` tables
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn user_summary(&self, id: Uuid) -> Result<UserSummary, MessagingError> {
        let row = sqlx::query(
            r#"
            SELECT id, username FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| UserSummary {
            id: r.get("id"),
            username: r.get("username"),
        })
        .ok_or(MessagingError::UserNotFound(id))
    }

    async fn ad_summary(&self, id: Uuid) -> Result<AdSummary, MessagingError> {
        let row = sqlx::query(
            r#"
            SELECT id, title FROM ads WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| AdSummary {
            id: r.get("id"),
            title: r.get("title"),
        })
        .ok_or(MessagingError::AdNotFound(id))
    }
}
