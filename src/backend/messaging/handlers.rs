//! Messaging HTTP Handlers
//!
//! Handlers for the inbox, conversation threads, and sending messages. The
//! viewing user always comes from the auth middleware, never from the
//! request body.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{InboxResponse, Message, SendMessageRequest, ThreadResponse};

use super::inbox;

/// Query parameters for the thread endpoint
#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    /// Ad scope; omitted for the general conversation
    pub ad: Option<Uuid>,
}

/// Get the viewer's inbox
///
/// GET /api/inbox (authenticated). One entry per distinct (counterparty,
/// ad) scope, newest activity first.
pub async fn get_inbox(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<InboxResponse>, BackendError> {
    let conversations =
        inbox::build_inbox(&state.message_store, &state.directory, user.user_id).await?;

    Ok(Json(InboxResponse { conversations }))
}

/// Open a conversation thread
///
/// GET /api/conversations/{user_id}?ad={ad_id} (authenticated). Marks the
/// counterparty's unread messages in this scope as read, then returns the
/// thread oldest-first.
pub async fn get_thread(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(counterparty): Path<Uuid>,
    Query(query): Query<ThreadQuery>,
) -> Result<Json<ThreadResponse>, BackendError> {
    let thread = inbox::open_thread(
        &state.message_store,
        &state.directory,
        user.user_id,
        counterparty,
        query.ad,
    )
    .await?;

    Ok(Json(thread))
}

/// Send a message
///
/// POST /api/messages (authenticated). The sender is the viewer; an empty
/// body is rejected with 400, an unknown recipient or ad with 404.
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Message>, BackendError> {
    let message = inbox::send_message(
        &state.message_store,
        &state.directory,
        user.user_id,
        request.recipient_id,
        request.ad_id,
        &request.body,
    )
    .await?;

    tracing::debug!(message_id = %message.id, "message sent");

    Ok(Json(message))
}
