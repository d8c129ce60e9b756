pub mod common;
pub mod necessities;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::necessity::{NecessityService, NecessitySettings};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub necessity: Arc<NecessityService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DatabaseConnection>, config: &AppConfig) -> Self {
        let necessity = Arc::new(NecessityService::new(
            db_pool,
            NecessitySettings::from(config),
        ));
        Self { necessity }
    }
}
