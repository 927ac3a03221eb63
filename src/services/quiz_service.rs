use crate::error::QuizError;
use crate::models::{Answer, Question, Target, TargetType};
use crate::repositories::QuizSource;
use crate::services::quiz_state::{reduce, QuizEvent, QuizState};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Drives one quiz traversal against a [`QuizSource`].
///
/// Owns the current [`QuizState`]; each operation performs at most one
/// chain of fetches, turns the outcome into a [`QuizEvent`] and swaps in
/// the reduced state. Fetch failures end the traversal in `Result` with
/// an error instead of being returned to the caller.
pub struct QuizController<S: QuizSource + ?Sized> {
    source: Arc<S>,
    state: QuizState,
}

impl<S: QuizSource + ?Sized> QuizController<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: QuizState::Start,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Fetch the quiz for `quiz_type` and enter its root question.
    /// Any previous traversal is discarded.
    pub async fn start(&mut self, quiz_type: &str) -> &QuizState {
        info!(quiz_type, "Starting quiz");
        let event = match self.load_root(quiz_type).await {
            Ok(event) => event,
            Err(err) => self.failure(err),
        };
        self.apply(event)
    }

    /// Follow an answer of the current question
    pub async fn select_answer(&mut self, answer_id: Uuid) -> &QuizState {
        let (answer, already_visited) = match &self.state {
            QuizState::Question(step) => match step.answer(answer_id) {
                Some(answer) => {
                    let visited = answer
                        .next_question_id
                        .is_some_and(|next| step.has_visited(next));
                    (answer.clone(), visited)
                }
                None => {
                    warn!(%answer_id, "Answer does not belong to the current question");
                    return &self.state;
                }
            },
            other => {
                warn!(state = other.name(), "Ignoring answer outside of a question");
                return &self.state;
            }
        };

        let event = match answer.next_question_id {
            Some(next_id) if already_visited => {
                error!(question_id = %next_id, "Quiz graph contains a cycle");
                QuizEvent::Failed(QuizError::CycleDetected(next_id))
            }
            Some(next_id) => match self.load_question(next_id).await {
                Ok((question, answers)) => QuizEvent::NextQuestion {
                    answer_id,
                    question,
                    answers,
                },
                Err(err) => self.failure(err),
            },
            None => match self.resolve_targets(&answer).await {
                Ok(targets) => QuizEvent::TargetsResolved { answer_id, targets },
                Err(err) => self.failure(err),
            },
        };
        self.apply(event)
    }

    /// Pick one of several candidate species
    pub fn select_target(&mut self, target_id: Uuid) -> &QuizState {
        if !matches!(self.state, QuizState::TargetSelection(_)) {
            warn!(state = self.state.name(), "Ignoring target choice outside of selection");
            return &self.state;
        }
        self.apply(QuizEvent::TargetChosen(target_id))
    }

    /// Return to the previously answered question
    pub fn go_back(&mut self) -> &QuizState {
        self.apply(QuizEvent::Back)
    }

    /// Discard everything and return to `Start`
    pub fn reset(&mut self) -> &QuizState {
        self.apply(QuizEvent::Reset)
    }

    fn apply(&mut self, event: QuizEvent) -> &QuizState {
        let current = std::mem::take(&mut self.state);
        let from = current.name();
        self.state = reduce(current, event);
        info!(from, to = self.state.name(), "Quiz state updated");
        &self.state
    }

    fn failure(&self, err: QuizError) -> QuizEvent {
        if err.is_not_found() {
            warn!(error = %err, "Quiz data missing");
        } else {
            error!(error = %err, "Quiz fetch failed");
        }
        QuizEvent::Failed(err)
    }

    async fn load_root(&self, quiz_type: &str) -> Result<QuizEvent, QuizError> {
        let quiz = self
            .source
            .get_quiz_by_type(quiz_type)
            .await?
            .ok_or_else(|| QuizError::QuizNotFound(quiz_type.to_string()))?;

        let root_id = quiz
            .root_question_id
            .ok_or_else(|| QuizError::RootQuestionMissing(quiz_type.to_string()))?;
        let (question, answers) = self.load_question(root_id).await?;

        Ok(QuizEvent::Loaded {
            quiz,
            question,
            answers,
        })
    }

    async fn load_question(&self, question_id: Uuid) -> Result<(Question, Vec<Answer>), QuizError> {
        let question = self
            .source
            .get_question_by_id(question_id)
            .await?
            .ok_or(QuizError::QuestionNotFound(question_id))?;
        let answers = self.source.get_answers_by_question(question.id).await?;
        Ok((question, answers))
    }

    async fn resolve_targets(&self, answer: &Answer) -> Result<Vec<Target>, QuizError> {
        let rows = self.source.get_targets_by_answer(answer.id).await?;

        let mut targets = Vec::with_capacity(rows.len());
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            let target_type = match row.target_type_enum() {
                Ok(target_type) => target_type,
                Err(e) => {
                    warn!(answer_id = %answer.id, "Skipping answer target: {}", e);
                    continue;
                }
            };
            if !seen.insert((target_type, row.target_id)) {
                warn!(
                    answer_id = %answer.id,
                    target_id = %row.target_id,
                    "Skipping duplicate answer target"
                );
                continue;
            }

            let target = match target_type {
                TargetType::Plant => self
                    .source
                    .get_plant_by_id(row.target_id)
                    .await?
                    .map(Target::Plant),
                TargetType::Insect => self
                    .source
                    .get_insect_by_id(row.target_id)
                    .await?
                    .map(Target::Insect),
            };

            match target {
                Some(target) => targets.push(target),
                None => warn!(
                    target_id = %row.target_id,
                    %target_type,
                    "Answer target points at a missing species"
                ),
            }
        }
        Ok(targets)
    }
}
