//! Shared application state.

use std::sync::Arc;

use drplanet_db::Database;

use crate::config::ServerConfig;

/// State threaded through every handler.
///
/// `Database` is a pool handle, so cloning the Arc is all the sharing
/// this server needs.
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Arc<Self> {
        Arc::new(AppState { db, config })
    }
}
