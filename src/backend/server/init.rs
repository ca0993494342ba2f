//! Server Initialization
//!
//! Builds the axum application: state from the connected pool, then the
//! router with all routes and middleware.

use axum::Router;
use sqlx::PgPool;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;

/// Create and configure the axum application
pub fn create_app(pool: PgPool) -> Router<()> {
    tracing::info!("Initializing adboard server");

    let app_state = AppState::new(pool);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
