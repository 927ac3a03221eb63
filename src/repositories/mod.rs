//! Data access.
//!
//! One repository struct per table talks to Postgres. The quiz and
//! leaderboard logic only sees the narrow traits below, implemented by
//! [`PgStore`] in production and [`InMemoryStore`] in tests.

pub mod answer_repository;
pub mod memory_store;
pub mod pg_store;
pub mod question_repository;
pub mod quiz_repository;
pub mod sighting_repository;
pub mod species_repository;
pub mod user_repository;

// Re-export all repositories for convenient access
pub use answer_repository::AnswerRepository;
pub use memory_store::InMemoryStore;
pub use pg_store::PgStore;
pub use question_repository::QuestionRepository;
pub use quiz_repository::QuizRepository;
pub use sighting_repository::SightingRepository;
pub use species_repository::SpeciesRepository;
pub use user_repository::UserRepository;

use crate::error::RepoResult;
use crate::models::{
    Answer, AnswerTarget, Insect, NewSighting, Plant, Question, Quiz, Sighting, User,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the quiz graph and the species it resolves to
#[async_trait]
pub trait QuizSource: Send + Sync {
    async fn get_quiz_by_type(&self, quiz_type: &str) -> RepoResult<Option<Quiz>>;

    async fn get_question_by_id(&self, id: Uuid) -> RepoResult<Option<Question>>;

    /// Answers of a question ordered by `sort_order`, then id
    async fn get_answers_by_question(&self, question_id: Uuid) -> RepoResult<Vec<Answer>>;

    async fn get_targets_by_answer(&self, answer_id: Uuid) -> RepoResult<Vec<AnswerTarget>>;

    async fn get_plant_by_id(&self, id: Uuid) -> RepoResult<Option<Plant>>;

    async fn get_insect_by_id(&self, id: Uuid) -> RepoResult<Option<Insect>>;
}

/// Read access to everything the leaderboard aggregates
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn get_all_users(&self) -> RepoResult<Vec<User>>;

    async fn get_all_sightings(&self) -> RepoResult<Vec<Sighting>>;
}

/// Insert-only sighting storage
#[async_trait]
pub trait SightingStore: Send + Sync {
    async fn insert_sighting(&self, sighting: &NewSighting) -> RepoResult<Sighting>;

    /// Sightings of one user, newest first
    async fn get_sightings_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Sighting>>;
}
