use super::{
    AnswerRepository, LeaderboardSource, QuestionRepository, QuizRepository, QuizSource,
    SightingRepository, SightingStore, SpeciesRepository, UserRepository,
};
use crate::error::RepoResult;
use crate::models::{
    Answer, AnswerTarget, Insect, NewSighting, Plant, Question, Quiz, Sighting, User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Postgres-backed store composed of the per-table repositories
#[derive(Clone)]
pub struct PgStore {
    pub quiz_repo: Arc<QuizRepository>,
    pub question_repo: Arc<QuestionRepository>,
    pub answer_repo: Arc<AnswerRepository>,
    pub species_repo: Arc<SpeciesRepository>,
    pub user_repo: Arc<UserRepository>,
    pub sighting_repo: Arc<SightingRepository>,
}

impl PgStore {
    /// Create a new PgStore sharing one pool across repositories
    pub fn new(pool: PgPool) -> Self {
        Self {
            quiz_repo: Arc::new(QuizRepository::new(pool.clone())),
            question_repo: Arc::new(QuestionRepository::new(pool.clone())),
            answer_repo: Arc::new(AnswerRepository::new(pool.clone())),
            species_repo: Arc::new(SpeciesRepository::new(pool.clone())),
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            sighting_repo: Arc::new(SightingRepository::new(pool)),
        }
    }
}

#[async_trait]
impl QuizSource for PgStore {
    async fn get_quiz_by_type(&self, quiz_type: &str) -> RepoResult<Option<Quiz>> {
        Ok(self.quiz_repo.find_by_type(quiz_type).await?)
    }

    async fn get_question_by_id(&self, id: Uuid) -> RepoResult<Option<Question>> {
        Ok(self.question_repo.find_by_id(id).await?)
    }

    async fn get_answers_by_question(&self, question_id: Uuid) -> RepoResult<Vec<Answer>> {
        Ok(self.answer_repo.find_by_question(question_id).await?)
    }

    async fn get_targets_by_answer(&self, answer_id: Uuid) -> RepoResult<Vec<AnswerTarget>> {
        Ok(self.answer_repo.find_targets(answer_id).await?)
    }

    async fn get_plant_by_id(&self, id: Uuid) -> RepoResult<Option<Plant>> {
        Ok(self.species_repo.find_plant(id).await?)
    }

    async fn get_insect_by_id(&self, id: Uuid) -> RepoResult<Option<Insect>> {
        Ok(self.species_repo.find_insect(id).await?)
    }
}

#[async_trait]
impl LeaderboardSource for PgStore {
    async fn get_all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.user_repo.find_all().await?)
    }

    async fn get_all_sightings(&self) -> RepoResult<Vec<Sighting>> {
        Ok(self.sighting_repo.find_all().await?)
    }
}

#[async_trait]
impl SightingStore for PgStore {
    async fn insert_sighting(&self, sighting: &NewSighting) -> RepoResult<Sighting> {
        Ok(self.sighting_repo.create(sighting).await?)
    }

    async fn get_sightings_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Sighting>> {
        Ok(self.sighting_repo.find_by_user(user_id).await?)
    }
}
