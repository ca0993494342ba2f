//! Router Configuration
//!
//! Combines the API routers, static file serving, and the 404 fallback
//! into the final axum router.

use axum::Router;
use tower_http::services::ServeDir;

use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = public_routes()
        .merge(protected_routes(app_state.clone()))
        .nest_service("/static", ServeDir::new("public"))
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
