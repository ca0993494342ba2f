//! Login Handler
//!
//! Implements user authentication for POST /api/auth/login. Verifies the
//! password against the stored bcrypt hash and issues a JWT token.

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// A wrong username and a wrong password both produce the same 401 so the
/// endpoint does not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let user = get_user_by_username(&state.pool, &request.username)
        .await?
        .ok_or(BackendError::Unauthorized)?;

    let password_ok = verify(&request.password, &user.password_hash)
        .map_err(|e| BackendError::internal(format!("Failed to verify password: {}", e)))?;

    if !password_ok {
        return Err(BackendError::Unauthorized);
    }

    let token = create_token(user.id, user.username.clone())
        .map_err(|e| BackendError::internal(format!("Failed to create token: {}", e)))?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
