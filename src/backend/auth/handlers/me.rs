//! Current-User Handler
//!
//! Implements GET /api/auth/me: resolves the bearer token to the user
//! record it belongs to.

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Get current user handler
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(BackendError::NotFound("user"))?;

    Ok(Json(UserResponse::from(&user)))
}
