use std::sync::Arc;

use crate::{config::Config, database::DbPool, services::storage::ObjectStorage};

/// Application state shared across all HTTP handlers
///
/// This struct contains shared resources that need to be accessed
/// by API handlers, such as the database pool and the object-storage
/// collaborator.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing candidate and user records
    pub pool: DbPool,
    /// Object-storage client for resume uploads, signed URLs, and proxying
    pub storage: Arc<ObjectStorage>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(pool: DbPool, storage: ObjectStorage, config: Config) -> Self {
        Self {
            pool,
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }
}
