//! Pollinator Backend Library
//!
//! Identification quiz engine, leaderboard ranking and sighting recording,
//! exposed for the CLI, tests and other consumers.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, QuizError, RepositoryError};

use database::Database;
use repositories::PgStore;
use services::{LeaderboardService, QuizController, SightingService};
use std::sync::Arc;

/// Application state containing the store and service constructors
pub struct AppState {
    pub database: Database,
    pub store: Arc<PgStore>,
}

impl AppState {
    /// Create a new AppState with initialized repositories
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            database: Database::new(pool.clone()),
            store: Arc::new(PgStore::new(pool)),
        }
    }

    /// Fresh quiz traversal, one per session
    pub fn quiz_controller(&self) -> QuizController<PgStore> {
        QuizController::new(self.store.clone())
    }

    pub fn leaderboard_service(&self) -> LeaderboardService<PgStore> {
        LeaderboardService::new(self.store.clone())
    }

    pub fn sighting_service(&self) -> SightingService<PgStore> {
        SightingService::new(self.store.clone())
    }
}
