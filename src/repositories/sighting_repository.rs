use crate::models::{NewSighting, Sighting};
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for sighting data access. Sightings are never updated or deleted.
pub struct SightingRepository {
    pool: PgPool,
}

impl SightingRepository {
    /// Create a new SightingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new sighting
    pub async fn create(&self, sighting: &NewSighting) -> SqlxResult<Sighting> {
        sqlx::query_as::<_, Sighting>(
            r#"
            INSERT INTO sightings (user_id, target_id, target_type, latitude, longitude, image_path)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id,
                user_id,
                target_id,
                target_type,
                is_validated,
                is_flagged,
                latitude,
                longitude,
                image_path,
                created_at
            "#,
        )
        .bind(sighting.user_id)
        .bind(sighting.target_id)
        .bind(sighting.target_type.as_str())
        .bind(sighting.latitude)
        .bind(sighting.longitude)
        .bind(sighting.image_path.as_deref())
        .fetch_one(&self.pool)
        .await
    }

    /// Find every sighting
    pub async fn find_all(&self) -> SqlxResult<Vec<Sighting>> {
        sqlx::query_as::<_, Sighting>(
            r#"
            SELECT
                id,
                user_id,
                target_id,
                target_type,
                is_validated,
                is_flagged,
                latitude,
                longitude,
                image_path,
                created_at
            FROM sightings
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find all sightings of a user, newest first
    pub async fn find_by_user(&self, user_id: Uuid) -> SqlxResult<Vec<Sighting>> {
        sqlx::query_as::<_, Sighting>(
            r#"
            SELECT
                id,
                user_id,
                target_id,
                target_type,
                is_validated,
                is_flagged,
                latitude,
                longitude,
                image_path,
                created_at
            FROM sightings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
