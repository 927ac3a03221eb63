use crate::error::{AppError, AppResult};
use crate::repositories::LeaderboardSource;
use crate::services::leaderboard::{compute_leaderboard, LeaderboardEntry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Snapshot held by a leaderboard screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LeaderboardState {
    #[default]
    Idle,
    Loaded(Vec<LeaderboardEntry>),
    Failed(String),
}

/// Service for loading the leaderboard
pub struct LeaderboardService<S: LeaderboardSource + ?Sized> {
    source: Arc<S>,
}

impl<S: LeaderboardSource + ?Sized> LeaderboardService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch users and sightings and rank them.
    ///
    /// With no users the sightings are not fetched at all.
    pub async fn fetch_leaderboard(
        &self,
        current_user_id: Option<Uuid>,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let users = self.source.get_all_users().await.map_err(AppError::from)?;
        if users.is_empty() {
            info!("No users, leaderboard is empty");
            return Ok(Vec::new());
        }

        let sightings = self
            .source
            .get_all_sightings()
            .await
            .map_err(AppError::from)?;

        let entries = compute_leaderboard(&users, &sightings, current_user_id);
        info!(
            users = users.len(),
            sightings = sightings.len(),
            "Leaderboard computed"
        );
        Ok(entries)
    }

    /// Like [`fetch_leaderboard`](Self::fetch_leaderboard) but folds any
    /// failure into [`LeaderboardState::Failed`]
    pub async fn load(&self, current_user_id: Option<Uuid>) -> LeaderboardState {
        match self.fetch_leaderboard(current_user_id).await {
            Ok(entries) => LeaderboardState::Loaded(entries),
            Err(e) => {
                error!("Failed to load leaderboard: {}", e);
                LeaderboardState::Failed(e.user_message())
            }
        }
    }
}
