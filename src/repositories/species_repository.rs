use crate::models::{Insect, Plant};
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for the plant and insect catalogue
pub struct SpeciesRepository {
    pool: PgPool,
}

impl SpeciesRepository {
    /// Create a new SpeciesRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_plant(&self, common_name: &str, scientific_name: &str) -> SqlxResult<Plant> {
        sqlx::query_as::<_, Plant>(
            r#"
            INSERT INTO plants (common_name, scientific_name)
            VALUES ($1, $2)
            RETURNING id, common_name, scientific_name, description, image_path
            "#,
        )
        .bind(common_name)
        .bind(scientific_name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn create_insect(
        &self,
        common_name: &str,
        scientific_name: &str,
        insect_order: Option<&str>,
    ) -> SqlxResult<Insect> {
        sqlx::query_as::<_, Insect>(
            r#"
            INSERT INTO insects (common_name, scientific_name, insect_order)
            VALUES ($1, $2, $3)
            RETURNING id, common_name, scientific_name, insect_order, description, image_path
            "#,
        )
        .bind(common_name)
        .bind(scientific_name)
        .bind(insect_order)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a plant by UUID
    pub async fn find_plant(&self, id: Uuid) -> SqlxResult<Option<Plant>> {
        sqlx::query_as::<_, Plant>(
            r#"
            SELECT id, common_name, scientific_name, description, image_path
            FROM plants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find an insect by UUID
    pub async fn find_insect(&self, id: Uuid) -> SqlxResult<Option<Insect>> {
        sqlx::query_as::<_, Insect>(
            r#"
            SELECT id, common_name, scientific_name, insect_order, description, image_path
            FROM insects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
