//! Shared handler state.

use kasir_db::Database;

/// State cloned into every handler.
///
/// `Database` only wraps the pool, so cloning is a reference-count bump.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
