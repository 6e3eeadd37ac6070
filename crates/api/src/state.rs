use std::sync::Arc;

use flashdeck_db::store::PgReviewStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flashdeck_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Review storage for the scheduler operations, sharing this state's pool.
    pub fn review_store(&self) -> PgReviewStore {
        PgReviewStore::new(self.pool.clone())
    }
}
