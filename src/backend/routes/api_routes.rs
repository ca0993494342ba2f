//! API Routes
//!
//! All JSON API routes, split into a public router and a protected router
//! wrapped in the auth middleware.
//!
//! # Public
//!
//! - `POST /api/auth/signup` - User registration
//! - `POST /api/auth/login` - User login
//! - `GET /api/ads` - Browse/search listings
//! - `GET /api/ads/{id}` - Listing detail
//! - `GET /api/categories` - Category list
//!
//! # Protected (bearer token required)
//!
//! - `GET /api/auth/me` - Current user
//! - `POST /api/ads/create` - Create a listing
//! - `GET /api/profile/ads` - Own listings
//! - `GET /api/inbox` - Conversation inbox
//! - `GET /api/conversations/{user_id}?ad=` - Open a thread
//! - `POST /api/messages` - Send a message

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::ads::handlers as ads;
use crate::backend::auth::handlers as auth;
use crate::backend::messaging::handlers as messaging;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;

/// Build the public API router
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/ads", get(ads::list_ads))
        .route("/api/ads/{id}", get(ads::ad_detail))
        .route("/api/categories", get(ads::list_categories))
}

/// Build the protected API router
///
/// Every route here goes through the auth middleware; handlers receive the
/// viewing user via the `AuthUser` extractor.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(auth::get_me))
        .route("/api/ads/create", post(ads::create_ad))
        .route("/api/profile/ads", get(ads::my_ads))
        .route("/api/inbox", get(messaging::get_inbox))
        .route("/api/conversations/{user_id}", get(messaging::get_thread))
        .route("/api/messages", post(messaging::send_message))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
