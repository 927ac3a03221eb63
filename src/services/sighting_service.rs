use crate::error::{AppError, AppResult};
use crate::models::{NewSighting, Sighting};
use crate::repositories::SightingStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for recording sightings
pub struct SightingService<S: SightingStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SightingStore + ?Sized> SightingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and insert a new sighting
    pub async fn record_sighting(&self, sighting: NewSighting) -> AppResult<Sighting> {
        sighting.validate().map_err(AppError::Validation)?;

        let row = self
            .store
            .insert_sighting(&sighting)
            .await
            .map_err(AppError::from)?;

        info!(
            sighting_id = %row.id,
            user_id = %row.user_id,
            target_type = %sighting.target_type,
            "Recorded sighting"
        );
        Ok(row)
    }

    /// A user's own sightings, newest first
    pub async fn sightings_for_user(&self, user_id: Uuid) -> AppResult<Vec<Sighting>> {
        Ok(self.store.get_sightings_by_user(user_id).await?)
    }
}
