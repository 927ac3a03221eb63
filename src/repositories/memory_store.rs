use super::{LeaderboardSource, QuizSource, SightingStore};
use crate::error::{RepoResult, RepositoryError};
use crate::models::{
    Answer, AnswerTarget, Insect, NewSighting, Plant, Question, Quiz, Sighting, User,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory store used by tests and local demos.
///
/// `fail_reads` / `fail_writes` make every read or write return
/// [`RepositoryError::Unavailable`]; `fail_sighting_reads` only fails the
/// sighting queries. `fetch_calls` counts reads.
pub struct InMemoryStore {
    pub quizzes: Mutex<Vec<Quiz>>,
    pub questions: Mutex<HashMap<Uuid, Question>>,
    pub answers: Mutex<Vec<Answer>>,
    pub answer_targets: Mutex<Vec<AnswerTarget>>,
    pub plants: Mutex<HashMap<Uuid, Plant>>,
    pub insects: Mutex<HashMap<Uuid, Insect>>,
    pub users: Mutex<Vec<User>>,
    pub sightings: Mutex<Vec<Sighting>>,
    pub fetch_calls: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_sighting_reads: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            quizzes: Mutex::new(Vec::new()),
            questions: Mutex::new(HashMap::new()),
            answers: Mutex::new(Vec::new()),
            answer_targets: Mutex::new(Vec::new()),
            plants: Mutex::new(HashMap::new()),
            insects: Mutex::new(HashMap::new()),
            users: Mutex::new(Vec::new()),
            sightings: Mutex::new(Vec::new()),
            fetch_calls: AtomicU64::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_sighting_reads: AtomicBool::new(false),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_quiz(&self, quiz: Quiz) {
        self.quizzes.lock().await.push(quiz);
    }

    pub async fn add_question(&self, question: Question) {
        self.questions.lock().await.insert(question.id, question);
    }

    pub async fn add_answer(&self, answer: Answer) {
        self.answers.lock().await.push(answer);
    }

    pub async fn add_answer_target(&self, target: AnswerTarget) {
        self.answer_targets.lock().await.push(target);
    }

    pub async fn add_plant(&self, plant: Plant) {
        self.plants.lock().await.insert(plant.id, plant);
    }

    pub async fn add_insect(&self, insect: Insect) {
        self.insects.lock().await.insert(insect.id, insect);
    }

    pub async fn add_user(&self, user: User) {
        self.users.lock().await.push(user);
    }

    pub async fn add_sighting(&self, sighting: Sighting) {
        self.sightings.lock().await.push(sighting);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sighting_reads(&self, fail: bool) {
        self.fail_sighting_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn begin_read(&self) -> RepoResult<()> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }

    fn begin_sighting_read(&self) -> RepoResult<()> {
        self.begin_read()?;
        if self.fail_sighting_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("sightings table offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl QuizSource for InMemoryStore {
    async fn get_quiz_by_type(&self, quiz_type: &str) -> RepoResult<Option<Quiz>> {
        self.begin_read()?;
        Ok(self
            .quizzes
            .lock()
            .await
            .iter()
            .find(|quiz| quiz.quiz_type == quiz_type)
            .cloned())
    }

    async fn get_question_by_id(&self, id: Uuid) -> RepoResult<Option<Question>> {
        self.begin_read()?;
        Ok(self.questions.lock().await.get(&id).cloned())
    }

    async fn get_answers_by_question(&self, question_id: Uuid) -> RepoResult<Vec<Answer>> {
        self.begin_read()?;
        let mut answers: Vec<Answer> = self
            .answers
            .lock()
            .await
            .iter()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
        Ok(answers)
    }

    async fn get_targets_by_answer(&self, answer_id: Uuid) -> RepoResult<Vec<AnswerTarget>> {
        self.begin_read()?;
        Ok(self
            .answer_targets
            .lock()
            .await
            .iter()
            .filter(|target| target.answer_id == answer_id)
            .cloned()
            .collect())
    }

    async fn get_plant_by_id(&self, id: Uuid) -> RepoResult<Option<Plant>> {
        self.begin_read()?;
        Ok(self.plants.lock().await.get(&id).cloned())
    }

    async fn get_insect_by_id(&self, id: Uuid) -> RepoResult<Option<Insect>> {
        self.begin_read()?;
        Ok(self.insects.lock().await.get(&id).cloned())
    }
}

#[async_trait]
impl LeaderboardSource for InMemoryStore {
    async fn get_all_users(&self) -> RepoResult<Vec<User>> {
        self.begin_read()?;
        Ok(self.users.lock().await.clone())
    }

    async fn get_all_sightings(&self) -> RepoResult<Vec<Sighting>> {
        self.begin_sighting_read()?;
        Ok(self.sightings.lock().await.clone())
    }
}

#[async_trait]
impl SightingStore for InMemoryStore {
    async fn insert_sighting(&self, sighting: &NewSighting) -> RepoResult<Sighting> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("in-memory store offline".to_string()));
        }
        let row = sighting.clone().into_sighting();
        self.sightings.lock().await.push(row.clone());
        Ok(row)
    }

    async fn get_sightings_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Sighting>> {
        self.begin_sighting_read()?;
        let mut rows: Vec<Sighting> = self
            .sightings
            .lock()
            .await
            .iter()
            .filter(|sighting| sighting.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
