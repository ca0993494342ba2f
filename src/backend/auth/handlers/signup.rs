//! Signup Handler
//!
//! Implements user registration for POST /api/auth/signup.
//!
//! # Validation
//!
//! - Username: 3-30 chars, starts with a letter, alphanumeric + underscore
//! - Password: at least 8 characters
//! - Email: must contain '@' (basic check, the mail collaborator does the rest)
//! - Username and email must be unique
//!
//! Passwords are hashed with bcrypt at DEFAULT_COST and never returned in
//! responses.

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Validate username format
///
/// Usernames must be 3-30 characters, start with a letter, and contain only
/// alphanumeric characters and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate password strength
///
/// Passwords must be at least 8 characters.
fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
}

/// Sign up handler
///
/// Validates the input, creates a new user account, and returns a JWT token
/// for immediate authentication.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    if !is_valid_username(&request.username) {
        return Err(BackendError::validation(
            "Username must be 3-30 characters, start with a letter, and contain only letters, digits, and underscores",
        ));
    }
    if !request.email.contains('@') {
        return Err(BackendError::validation("Invalid email address"));
    }
    if !is_valid_password(&request.password) {
        return Err(BackendError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if get_user_by_username(&state.pool, &request.username)
        .await?
        .is_some()
    {
        return Err(BackendError::conflict("Username already taken"));
    }
    if get_user_by_email(&state.pool, &request.email)
        .await?
        .is_some()
    {
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| BackendError::internal(format!("Failed to hash password: {}", e)))?;

    let user = create_user(&state.pool, request.username, request.email, password_hash).await?;

    let token = create_token(user.id, user.username.clone())
        .map_err(|e| BackendError::internal(format!("Failed to create token: {}", e)))?;

    tracing::info!(user_id = %user.id, "new user registered");

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
