use crate::models::Question;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for question data access
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    /// Create a new QuestionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new question
    pub async fn create(
        &self,
        quiz_id: Uuid,
        text_en: &str,
        text_de: Option<&str>,
        image_path: Option<&str>,
    ) -> SqlxResult<Question> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (quiz_id, text_en, text_de, image_path)
            VALUES ($1, $2, $3, $4)
            RETURNING id, quiz_id, text_en, text_de, image_path
            "#,
        )
        .bind(quiz_id)
        .bind(text_en)
        .bind(text_de)
        .bind(image_path)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a question by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, text_en, text_de, image_path
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
