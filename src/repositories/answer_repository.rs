use crate::models::{Answer, AnswerTarget, TargetType};
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for answers and the classification targets of leaf answers
pub struct AnswerRepository {
    pool: PgPool,
}

impl AnswerRepository {
    /// Create a new AnswerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new answer
    pub async fn create(
        &self,
        question_id: Uuid,
        text_en: &str,
        text_de: Option<&str>,
        next_question_id: Option<Uuid>,
        sort_order: i32,
    ) -> SqlxResult<Answer> {
        sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (question_id, text_en, text_de, next_question_id, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, question_id, text_en, text_de, image_path, next_question_id, sort_order
            "#,
        )
        .bind(question_id)
        .bind(text_en)
        .bind(text_de)
        .bind(next_question_id)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
    }

    /// Find all answers of a question in display order
    pub async fn find_by_question(&self, question_id: Uuid) -> SqlxResult<Vec<Answer>> {
        sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, text_en, text_de, image_path, next_question_id, sort_order
            FROM answers
            WHERE question_id = $1
            ORDER BY sort_order ASC, id ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Attach a classification target to a leaf answer
    pub async fn add_target(
        &self,
        answer_id: Uuid,
        target_id: Uuid,
        target_type: TargetType,
    ) -> SqlxResult<AnswerTarget> {
        sqlx::query_as::<_, AnswerTarget>(
            r#"
            INSERT INTO answer_targets (answer_id, target_id, target_type)
            VALUES ($1, $2, $3)
            RETURNING id, answer_id, target_id, target_type
            "#,
        )
        .bind(answer_id)
        .bind(target_id)
        .bind(target_type.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Find the targets of a leaf answer
    pub async fn find_targets(&self, answer_id: Uuid) -> SqlxResult<Vec<AnswerTarget>> {
        sqlx::query_as::<_, AnswerTarget>(
            r#"
            SELECT id, answer_id, target_id, target_type
            FROM answer_targets
            WHERE answer_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(answer_id)
        .fetch_all(&self.pool)
        .await
    }
}
