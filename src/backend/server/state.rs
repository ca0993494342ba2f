//! Application State
//!
//! The state shared across all handlers: the connection pool plus the
//! messaging store and directory built on top of it. The pool is cheap to
//! clone (it is reference-counted internally), so the state derives Clone.

use sqlx::PgPool;

use crate::backend::messaging::db::{PgDirectory, PgMessageStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: PgPool,
    /// Message store used by the conversation aggregator
    pub message_store: PgMessageStore,
    /// Identity directory used by the conversation aggregator
    pub directory: PgDirectory,
}

impl AppState {
    /// Build the application state from a connected pool
    pub fn new(pool: PgPool) -> Self {
        let message_store = PgMessageStore::new(pool.clone());
        let directory = PgDirectory::new(pool.clone());
        Self {
            pool,
            message_store,
            directory,
        }
    }
}
