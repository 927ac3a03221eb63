use crate::models::Quiz;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for quiz data access
pub struct QuizRepository {
    pool: PgPool,
}

impl QuizRepository {
    /// Create a new QuizRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new quiz without a root question
    pub async fn create(&self, quiz_type: &str) -> SqlxResult<Quiz> {
        sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (quiz_type)
            VALUES ($1)
            RETURNING id, quiz_type, root_question_id
            "#,
        )
        .bind(quiz_type)
        .fetch_one(&self.pool)
        .await
    }

    /// Point a quiz at its root question
    pub async fn set_root_question(&self, quiz_id: Uuid, question_id: Uuid) -> SqlxResult<Quiz> {
        sqlx::query_as::<_, Quiz>(
            r#"
            UPDATE quizzes
            SET root_question_id = $2
            WHERE id = $1
            RETURNING id, quiz_type, root_question_id
            "#,
        )
        .bind(quiz_id)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Find the quiz for a subject type
    pub async fn find_by_type(&self, quiz_type: &str) -> SqlxResult<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, quiz_type, root_question_id
            FROM quizzes
            WHERE quiz_type = $1
            "#,
        )
        .bind(quiz_type)
        .fetch_optional(&self.pool)
        .await
    }
}
