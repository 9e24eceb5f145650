use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::ai::{ChatClient, MistralClient};
use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Application configuration
    pub config: Arc<Config>,
    /// Chat model used by the advisor endpoints
    pub ai: Arc<dyn ChatClient>,
}

impl AppState {
    /// Create state backed by the configured hosted chat model
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let ai = Arc::new(MistralClient::new(config.ai.clone()));
        Self::with_ai(db, config, ai)
    }

    /// Create state with an explicit chat client
    pub fn with_ai(db: DatabaseConnection, config: Config, ai: Arc<dyn ChatClient>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            ai,
        }
    }
}
