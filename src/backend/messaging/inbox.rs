//! Conversation Aggregation
//!
//! Builds a user's inbox out of the raw message table and handles opening a
//! thread (which flips unread messages to read) and sending.
//!
//! A conversation is the pair (counterparty, optional ad) relative to the
//! viewing user. The inbox is the set of distinct such pairs across every
//! message the viewer has sent or received, newest activity first. Nothing
//! here is persisted; each request recomputes the view from the store.

use std::collections::HashSet;

use uuid::Uuid;

use crate::shared::messaging::{
    AdSummary, Conversation, ConversationKey, Message, NewMessage, ThreadResponse,
};

use super::store::{Directory, MessageStore, MessagingError};

/// Build the inbox for a viewing user
///
/// Scans the distinct scopes on the received side, then the sent side,
/// deduplicating by [`ConversationKey`]: a scope already discovered from
/// received messages is not re-added from sent ones. The last message shown
/// for a scope is directional — for a received scope it is the latest
/// counterparty-to-viewer message, for a sent-only scope the latest
/// viewer-to-counterparty message (and the unread count is zero, since the
/// viewer cannot have unread copies of their own messages).
///
/// The result is sorted by last-message time descending; a conversation
/// with no resolvable last message sorts last.
pub async fn build_inbox<S, D>(
    store: &S,
    directory: &D,
    viewer: Uuid,
) -> Result<Vec<Conversation>, MessagingError>
where
    S: MessageStore + ?Sized,
    D: Directory + ?Sized,
{
    let mut conversations = Vec::new();
    let mut seen: HashSet<ConversationKey> = HashSet::new();

    for key in store.incoming_scopes(viewer).await? {
        if !seen.insert(key) {
            continue;
        }
        let counterparty = directory.user_summary(key.counterparty).await?;
        let ad = resolve_ad(directory, key.ad).await?;
        let last_message = store.latest_between(key.counterparty, viewer, key.ad).await?;
        let unread_count = store.unread_count(key.counterparty, viewer, key.ad).await?;
        conversations.push(Conversation {
            counterparty,
            ad,
            last_message,
            unread_count,
        });
    }

    for key in store.outgoing_scopes(viewer).await? {
        if !seen.insert(key) {
            continue;
        }
        let counterparty = directory.user_summary(key.counterparty).await?;
        let ad = resolve_ad(directory, key.ad).await?;
        let last_message = store.latest_between(viewer, key.counterparty, key.ad).await?;
        conversations.push(Conversation {
            counterparty,
            ad,
            last_message,
            unread_count: 0,
        });
    }

    // Stable sort: None < Some, so conversations without a resolvable last
    // message end up at the bottom.
    conversations.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));

    Ok(conversations)
}

/// Open the thread with a counterparty in an ad scope
///
/// Marks every unread counterparty-to-viewer message in the scope as read,
/// then returns the full two-way thread in chronological order. The two
/// steps are sequential, not atomic; a concurrent open of the same thread
/// is benign because re-marking read messages is a no-op.
///
/// Fails with NotFound before any mutation if the counterparty or ad does
/// not resolve.
pub async fn open_thread<S, D>(
    store: &S,
    directory: &D,
    viewer: Uuid,
    counterparty: Uuid,
    ad: Option<Uuid>,
) -> Result<ThreadResponse, MessagingError>
where
    S: MessageStore + ?Sized,
    D: Directory + ?Sized,
{
    let counterparty_summary = directory.user_summary(counterparty).await?;
    let ad_summary = resolve_ad(directory, ad).await?;

    let marked = store.mark_read(counterparty, viewer, ad).await?;
    if marked > 0 {
        tracing::debug!(%viewer, %counterparty, marked, "marked messages read");
    }

    let messages = store.thread(viewer, counterparty, ad).await?;

    Ok(ThreadResponse {
        counterparty: counterparty_summary,
        ad: ad_summary,
        messages,
    })
}

/// Send a message
///
/// The only validation at this layer is a non-empty body; form-level rules
/// belong to the handler. Recipient and ad are resolved first so a stale ID
/// fails with NotFound instead of a foreign-key error.
pub async fn send_message<S, D>(
    store: &S,
    directory: &D,
    sender: Uuid,
    recipient: Uuid,
    ad: Option<Uuid>,
    body: &str,
) -> Result<Message, MessagingError>
where
    S: MessageStore + ?Sized,
    D: Directory + ?Sized,
{
    if body.trim().is_empty() {
        return Err(MessagingError::EmptyBody);
    }

    directory.user_summary(recipient).await?;
    if let Some(ad_id) = ad {
        directory.ad_summary(ad_id).await?;
    }

    store
        .insert(NewMessage {
            sender_id: sender,
            recipient_id: recipient,
            ad_id: ad,
            body: body.to_string(),
        })
        .await
}

async fn resolve_ad<D>(directory: &D, ad: Option<Uuid>) -> Result<Option<AdSummary>, MessagingError>
where
    D: Directory + ?Sized,
{
    match ad {
        Some(id) => Ok(Some(directory.ad_summary(id).await?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::messaging::UserSummary;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    /// In-memory store implementing both traits.
    ///
    /// Inserts get a monotonically increasing timestamp so ordering
    /// assertions are deterministic.
    struct MemStore {
        messages: Mutex<Vec<Message>>,
        users: HashMap<Uuid, String>,
        ads: HashMap<Uuid, String>,
        clock: AtomicI64,
    }

    impl MemStore {
        fn new(users: &[(Uuid, &str)], ads: &[(Uuid, &str)]) -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
                users: users
                    .iter()
                    .map(|(id, name)| (*id, name.to_string()))
                    .collect(),
                ads: ads.iter().map(|(id, t)| (*id, t.to_string())).collect(),
                clock: AtomicI64::new(0),
            }
        }

        fn next_timestamp(&self) -> DateTime<Utc> {
            let tick = self.clock.fetch_add(1, Ordering::SeqCst);
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(tick)
        }
    }

    #[async_trait]
    impl MessageStore for MemStore {
        async fn insert(&self, message: NewMessage) -> Result<Message, MessagingError> {
            let stored = Message {
                id: Uuid::new_v4(),
                sender_id: message.sender_id,
                recipient_id: message.recipient_id,
                ad_id: message.ad_id,
                body: message.body,
                created_at: self.next_timestamp(),
                is_read: false,
            };
            self.messages.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn incoming_scopes(
            &self,
            recipient: Uuid,
        ) -> Result<Vec<ConversationKey>, MessagingError> {
            let mut keys = Vec::new();
            for m in self.messages.lock().unwrap().iter() {
                if m.recipient_id == recipient {
                    let key = ConversationKey::new(m.sender_id, m.ad_id);
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }
            Ok(keys)
        }

        async fn outgoing_scopes(
            &self,
            sender: Uuid,
        ) -> Result<Vec<ConversationKey>, MessagingError> {
            let mut keys = Vec::new();
            for m in self.messages.lock().unwrap().iter() {
                if m.sender_id == sender {
                    let key = ConversationKey::new(m.recipient_id, m.ad_id);
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }
            Ok(keys)
        }

        async fn latest_between(
            &self,
            sender: Uuid,
            recipient: Uuid,
            ad: Option<Uuid>,
        ) -> Result<Option<Message>, MessagingError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.sender_id == sender && m.recipient_id == recipient && m.ad_id == ad)
                .max_by_key(|m| m.created_at)
                .cloned())
        }

        async fn unread_count(
            &self,
            sender: Uuid,
            recipient: Uuid,
            ad: Option<Uuid>,
        ) -> Result<u32, MessagingError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| {
                    m.sender_id == sender
                        && m.recipient_id == recipient
                        && m.ad_id == ad
                        && !m.is_read
                })
                .count() as u32)
        }

        async fn mark_read(
            &self,
            sender: Uuid,
            recipient: Uuid,
            ad: Option<Uuid>,
        ) -> Result<u64, MessagingError> {
            let mut changed = 0;
            for m in self.messages.lock().unwrap().iter_mut() {
                if m.sender_id == sender
                    && m.recipient_id == recipient
                    && m.ad_id == ad
                    && !m.is_read
                {
                    m.is_read = true;
                    changed += 1;
                }
            }
            Ok(changed)
        }

        async fn thread(
            &self,
            user_a: Uuid,
            user_b: Uuid,
            ad: Option<Uuid>,
        ) -> Result<Vec<Message>, MessagingError> {
            let mut messages: Vec<Message> = self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| {
                    m.ad_id == ad
                        && ((m.sender_id == user_a && m.recipient_id == user_b)
                            || (m.sender_id == user_b && m.recipient_id == user_a))
                })
                .cloned()
                .collect();
            messages.sort_by_key(|m| m.created_at);
            Ok(messages)
        }
    }

    #[async_trait]
    impl Directory for MemStore {
        async fn user_summary(&self, id: Uuid) -> Result<UserSummary, MessagingError> {
            self.users
                .get(&id)
                .map(|username| UserSummary {
                    id,
                    username: username.clone(),
                })
                .ok_or(MessagingError::UserNotFound(id))
        }

        async fn ad_summary(&self, id: Uuid) -> Result<AdSummary, MessagingError> {
            self.ads
                .get(&id)
                .map(|title| AdSummary {
                    id,
                    title: title.clone(),
                })
                .ok_or(MessagingError::AdNotFound(id))
        }
    }

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[tokio::test]
    async fn test_empty_inbox_is_empty_not_error() {
        let users = ids(1);
        let store = MemStore::new(&[(users[0], "alice")], &[]);

        let inbox = build_inbox(&store, &store, users[0]).await.unwrap();
        assert!(inbox.is_empty());
    }

    #[tokio::test]
    async fn test_one_conversation_per_distinct_scope() {
        let users = ids(3);
        let ads = ids(2);
        let (alice, bob, carol) = (users[0], users[1], users[2]);
        let store = MemStore::new(
            &[(alice, "alice"), (bob, "bob"), (carol, "carol")],
            &[(ads[0], "bike"), (ads[1], "couch")],
        );

        // Four distinct scopes touching alice: (bob, bike) received,
        // (bob, None) received, (bob, couch) sent-only, (carol, None) sent.
        send_message(&store, &store, bob, alice, Some(ads[0]), "bike?").await.unwrap();
        send_message(&store, &store, bob, alice, Some(ads[0]), "still there?").await.unwrap();
        send_message(&store, &store, bob, alice, None, "hey").await.unwrap();
        send_message(&store, &store, alice, bob, Some(ads[1]), "couch?").await.unwrap();
        send_message(&store, &store, alice, carol, None, "hi carol").await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(inbox.len(), 4);

        let keys: HashSet<ConversationKey> = inbox
            .iter()
            .map(|c| ConversationKey::new(c.counterparty.id, c.ad.as_ref().map(|a| a.id)))
            .collect();
        assert_eq!(keys.len(), 4, "no duplicate scopes");
    }

    #[tokio::test]
    async fn test_scope_seen_in_both_directions_appears_once() {
        let users = ids(2);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[]);

        send_message(&store, &store, bob, alice, None, "hello").await.unwrap();
        send_message(&store, &store, alice, bob, None, "hello back").await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].counterparty.username, "bob");
        // Discovered via the received set, so the preview is the latest
        // message from bob, not alice's own reply.
        assert_eq!(inbox[0].last_message.as_ref().unwrap().body, "hello");
    }

    #[tokio::test]
    async fn test_general_and_ad_scopes_are_separate_conversations() {
        let users = ids(2);
        let ads = ids(1);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[(ads[0], "bike")]);

        send_message(&store, &store, bob, alice, Some(ads[0]), "about the bike").await.unwrap();
        send_message(&store, &store, bob, alice, None, "unrelated hello").await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert!(inbox.iter().any(|c| c.ad.is_some()));
        assert!(inbox.iter().any(|c| c.ad.is_none()));
    }

    #[tokio::test]
    async fn test_sent_only_conversation_has_zero_unread() {
        let users = ids(2);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[]);

        send_message(&store, &store, alice, bob, None, "anyone home?").await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].unread_count, 0);
        assert_eq!(inbox[0].last_message.as_ref().unwrap().body, "anyone home?");
    }

    #[tokio::test]
    async fn test_reply_scenario_counts_and_previews() {
        let users = ids(2);
        let ads = ids(1);
        let (u, v) = (users[0], users[1]);
        let store = MemStore::new(&[(u, "u"), (v, "v")], &[(ads[0], "lamp")]);

        // U messages V about the ad at t1, V replies at t2.
        send_message(&store, &store, u, v, Some(ads[0]), "is the lamp available?").await.unwrap();
        send_message(&store, &store, v, u, Some(ads[0]), "it is!").await.unwrap();

        // V's view: scope discovered via received set, one unread from U,
        // preview is U's message.
        let v_inbox = build_inbox(&store, &store, v).await.unwrap();
        assert_eq!(v_inbox.len(), 1);
        assert_eq!(v_inbox[0].unread_count, 1);
        assert_eq!(
            v_inbox[0].last_message.as_ref().unwrap().body,
            "is the lamp available?"
        );

        // U's view: V's reply is unread, preview is the reply at t2.
        let u_inbox = build_inbox(&store, &store, u).await.unwrap();
        assert_eq!(u_inbox.len(), 1);
        assert_eq!(u_inbox[0].unread_count, 1);
        assert_eq!(u_inbox[0].last_message.as_ref().unwrap().body, "it is!");
    }

    #[tokio::test]
    async fn test_inbox_sorted_by_recency_descending() {
        let users = ids(4);
        let alice = users[0];
        let store = MemStore::new(
            &[
                (users[0], "alice"),
                (users[1], "bob"),
                (users[2], "carol"),
                (users[3], "dave"),
            ],
            &[],
        );

        send_message(&store, &store, users[1], alice, None, "first").await.unwrap();
        send_message(&store, &store, users[2], alice, None, "second").await.unwrap();
        send_message(&store, &store, users[3], alice, None, "third").await.unwrap();
        // bob again: his conversation becomes the most recent.
        send_message(&store, &store, users[1], alice, None, "fourth").await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        let order: Vec<&str> = inbox
            .iter()
            .map(|c| c.counterparty.username.as_str())
            .collect();
        assert_eq!(order, vec!["bob", "dave", "carol"]);

        let times: Vec<_> = inbox.iter().map(|c| c.last_activity()).collect();
        let mut sorted = times.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(times, sorted);
    }

    #[tokio::test]
    async fn test_open_thread_marks_read_and_is_idempotent() {
        let users = ids(2);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[]);

        send_message(&store, &store, bob, alice, None, "one").await.unwrap();
        send_message(&store, &store, bob, alice, None, "two").await.unwrap();

        let before = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(before[0].unread_count, 2);

        let thread = open_thread(&store, &store, alice, bob, None).await.unwrap();
        assert_eq!(thread.messages.len(), 2);
        assert!(thread.messages.iter().all(|m| m.is_read));

        let after = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(after[0].unread_count, 0);

        // Second open changes nothing further.
        let marked = store.mark_read(bob, alice, None).await.unwrap();
        assert_eq!(marked, 0);
        let again = open_thread(&store, &store, alice, bob, None).await.unwrap();
        assert_eq!(again.messages.len(), 2);
        let after_again = build_inbox(&store, &store, alice).await.unwrap();
        assert_eq!(after_again[0].unread_count, 0);
    }

    #[tokio::test]
    async fn test_open_thread_scoped_to_one_ad() {
        let users = ids(2);
        let ads = ids(1);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[(ads[0], "bike")]);

        send_message(&store, &store, bob, alice, Some(ads[0]), "about the bike").await.unwrap();
        send_message(&store, &store, bob, alice, None, "general hello").await.unwrap();

        // Opening the ad thread must not touch the general one.
        open_thread(&store, &store, alice, bob, Some(ads[0])).await.unwrap();

        let inbox = build_inbox(&store, &store, alice).await.unwrap();
        let general = inbox.iter().find(|c| c.ad.is_none()).unwrap();
        let about_ad = inbox.iter().find(|c| c.ad.is_some()).unwrap();
        assert_eq!(general.unread_count, 1);
        assert_eq!(about_ad.unread_count, 0);
    }

    #[tokio::test]
    async fn test_thread_is_chronological_and_two_way() {
        let users = ids(2);
        let (alice, bob) = (users[0], users[1]);
        let store = MemStore::new(&[(alice, "alice"), (bob, "bob")], &[]);

        send_message(&store, &store, alice, bob, None, "1").await.unwrap();
        send_message(&store, &store, bob, alice, None, "2").await.unwrap();
        send_message(&store, &store, alice, bob, None, "3").await.unwrap();

        let thread = open_thread(&store, &store, alice, bob, None).await.unwrap();
        let bodies: Vec<&str> = thread.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_open_thread_with_unknown_counterparty_is_not_found() {
        let users = ids(1);
        let store = MemStore::new(&[(users[0], "alice")], &[]);

        let result = open_thread(&store, &store, users[0], Uuid::new_v4(), None).await;
        assert_matches!(result, Err(MessagingError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_open_thread_with_unknown_ad_is_not_found() {
        let users = ids(2);
        let store = MemStore::new(&[(users[0], "alice"), (users[1], "bob")], &[]);

        let result = open_thread(&store, &store, users[0], users[1], Some(Uuid::new_v4())).await;
        assert_matches!(result, Err(MessagingError::AdNotFound(_)));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_body() {
        let users = ids(2);
        let store = MemStore::new(&[(users[0], "alice"), (users[1], "bob")], &[]);

        let result = send_message(&store, &store, users[0], users[1], None, "   ").await;
        assert_matches!(result, Err(MessagingError::EmptyBody));

        let result = send_message(&store, &store, users[0], users[1], None, "").await;
        assert_matches!(result, Err(MessagingError::EmptyBody));
    }

    #[tokio::test]
    async fn test_send_to_unknown_recipient_is_not_found() {
        let users = ids(1);
        let store = MemStore::new(&[(users[0], "alice")], &[]);

        let result = send_message(&store, &store, users[0], Uuid::new_v4(), None, "hi").await;
        assert_matches!(result, Err(MessagingError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_sent_message_starts_unread() {
        let users = ids(2);
        let store = MemStore::new(&[(users[0], "alice"), (users[1], "bob")], &[]);

        let message = send_message(&store, &store, users[0], users[1], None, "hi").await.unwrap();
        assert!(!message.is_read);
        assert_eq!(message.sender_id, users[0]);
        assert_eq!(message.recipient_id, users[1]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Random traffic between a handful of users over a couple of ads:
        /// the inbox must have exactly one entry per distinct derivable
        /// scope and be sorted by recency.
        fn traffic_strategy() -> impl Strategy<Value = Vec<(usize, usize, Option<usize>)>> {
            proptest::collection::vec(
                (0..4usize, 0..4usize, proptest::option::of(0..2usize)),
                0..40,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn inbox_covers_each_scope_exactly_once(traffic in traffic_strategy()) {
                tokio_test::block_on(async {
                    let users = ids(4);
                    let ads = ids(2);
                    let store = MemStore::new(
                        &[(users[0], "u0"), (users[1], "u1"), (users[2], "u2"), (users[3], "u3")],
                        &[(ads[0], "a0"), (ads[1], "a1")],
                    );

                    for (s, r, a) in &traffic {
                        if s == r {
                            continue;
                        }
                        send_message(
                            &store,
                            &store,
                            users[*s],
                            users[*r],
                            a.map(|i| ads[i]),
                            "x",
                        )
                        .await
                        .unwrap();
                    }

                    for viewer in &users {
                        let inbox = build_inbox(&store, &store, *viewer).await.unwrap();

                        // Expected scopes straight from the definition.
                        let mut expected: HashSet<ConversationKey> = HashSet::new();
                        for (s, r, a) in &traffic {
                            if s == r {
                                continue;
                            }
                            let ad = a.map(|i| ads[i]);
                            if users[*r] == *viewer {
                                expected.insert(ConversationKey::new(users[*s], ad));
                            }
                            if users[*s] == *viewer {
                                expected.insert(ConversationKey::new(users[*r], ad));
                            }
                        }

                        let actual: Vec<ConversationKey> = inbox
                            .iter()
                            .map(|c| {
                                ConversationKey::new(
                                    c.counterparty.id,
                                    c.ad.as_ref().map(|a| a.id),
                                )
                            })
                            .collect();
                        let distinct: HashSet<ConversationKey> =
                            actual.iter().copied().collect();

                        prop_assert_eq!(actual.len(), distinct.len(), "no duplicates");
                        prop_assert_eq!(distinct, expected, "no omissions");

                        let times: Vec<_> =
                            inbox.iter().map(|c| c.last_activity()).collect();
                        let mut sorted = times.clone();
                        sorted.sort_by(|a, b| b.cmp(a));
                        prop_assert_eq!(times, sorted, "sorted by recency");
                    }
                    Ok(())
                })?;
            }
        }
    }
}
